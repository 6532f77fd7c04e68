use vtlex::{Action, Parser};

fn main() {
    let input = b"\x1b[1;31mhi\x1b[0m\x1b]0;demo\x07\n";

    let mut parser = Parser::new();
    let mut off = 0;
    loop {
        let window = &input[off..];
        let n = parser.advance(window);
        if parser.has_event() {
            match parser.action() {
                Action::None => {},
                Action::Print | Action::Put | Action::OscPut => {
                    let payload = &window[parser.run()];
                    println!(
                        "{}: {:?}",
                        parser.action(),
                        String::from_utf8_lossy(payload)
                    );
                },
                action => println!(
                    "{action}: byte={:#04x} params={:?} interms={:?}",
                    parser.byte(),
                    parser.params(),
                    parser.intermediates()
                ),
            }
        }
        off += n;
        if n == 0 && !parser.has_event() && off == input.len() {
            break;
        }
    }
}
