mod link;

fn main() {
    link::build();
}
