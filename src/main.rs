use resh::Interpreter;

fn main() -> anyhow::Result<()> {
    Interpreter::default().repl()
}
