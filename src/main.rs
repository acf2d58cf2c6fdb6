use fracalc::repl::{eval_line, Reply};
use rustyline::DefaultEditor;

fn main() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline("? ") {
            Ok(line) => line,
            // End of input or interrupt: leave quietly.
            Err(_) => break,
        };

        match eval_line(&line) {
            Ok(Reply::Exit) => break,
            Ok(Reply::Value(result)) => println!("= {result}"),
            Err(e) => println!("!!! {e} !!!"),
        }
        println!();
    }

    Ok(())
}
