use netfield::Background;

fn main() -> Result<(), netfield::BackgroundError> {
    Background::new().run()
}
