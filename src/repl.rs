use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use shifu::lexer::Lexer;
use shifu::{parser, Error, Interpreter};
use strum_macros::{Display, EnumString};

const PROMPT: &str = ">> ";

/// Which stage of the pipeline gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    Lexer,
    Parser,
    Lang,
}

/// Runs `source` as far as `mode` asks and returns the text to print.
pub fn render(mode: OutputMode, source: &str, interpreter: &mut Interpreter) -> Result<String, Error> {
    match mode {
        OutputMode::Lexer => Ok(Lexer::new(source)
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputMode::Parser => parser::parse(source)
            .map(|program| program.to_string())
            .map_err(Error::Parse),
        OutputMode::Lang => shifu::run(source, interpreter).map(|value| value.inspect()),
    }
}

pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    mode: OutputMode,
}

impl Repl {
    pub fn new(mode: OutputMode) -> rustyline::Result<Repl> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            interpreter: Interpreter::new(),
            mode,
        })
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
        println!("Hello {}! This is the Shifu programming language.", user);
        println!("Attain inner peace by exploring the language!!");
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());
                    match render(self.mode, &line, &mut self.interpreter) {
                        Ok(output) => println!("{}", output),
                        Err(e) => println!("{}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    debug!("End of input, leaving the REPL");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }
}
