//! Menu-driven console front-end.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use rp_core::PredictorKind;
use rp_decisions::DecisionEngine;
use rp_runtime::MetricsRegistry;
use rp_views::{console as text, PredictionView};
use tracing::debug;

use crate::assistant::{self, Reply};

pub struct ConsoleApp<'a, R, W> {
    engine: &'a DecisionEngine,
    metrics: MetricsRegistry,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> ConsoleApp<'a, R, W> {
    pub fn new(engine: &'a DecisionEngine, metrics: MetricsRegistry, input: R, output: W) -> Self {
        Self { engine, metrics, input, output }
    }

    /// Loop over the main menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", text::menu())?;
            let Some(choice) = self.ask(&text::choice_prompt())? else {
                break;
            };
            let keep_going = match choice.as_str() {
                "1" => self.predict(PredictorKind::Footfall)?,
                "2" => self.predict(PredictorKind::Delivery)?,
                "3" => self.predict(PredictorKind::Clv)?,
                "4" => self.chat()?,
                "5" => break,
                _ => {
                    writeln!(self.output, "{}", text::invalid_choice())?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "{}", text::goodbye())?;
        self.output.flush()
    }

    /// One prediction round. Returns `false` when input ended mid-way.
    fn predict(&mut self, kind: PredictorKind) -> io::Result<bool> {
        writeln!(self.output, "{}", text::section_header(kind))?;
        let mut fields = BTreeMap::new();
        for field in kind.input_fields() {
            match self.ask(&text::prompt(field))? {
                Some(answer) => {
                    fields.insert(field.name.to_string(), answer);
                }
                None => return Ok(false),
            }
        }

        let outcome = self.engine.infer_fields(kind, &fields);
        self.metrics.record(kind, &outcome);
        let rendered = match outcome {
            Ok(summary) => text::render_prediction(&PredictionView::from(&summary)),
            Err(err) => text::render_error(&err),
        };
        write!(self.output, "{rendered}")?;
        writeln!(self.output)?;
        Ok(true)
    }

    fn chat(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{}", assistant::GREETING)?;
        loop {
            let Some(message) = self.ask("You: ")? else {
                return Ok(false);
            };
            match assistant::reply(&message) {
                Reply::Leave => {
                    writeln!(self.output, "Bot: Going back to main menu.\n")?;
                    return Ok(true);
                }
                Reply::Say(answer) => writeln!(self.output, "Bot: {answer}\n")?,
            }
        }
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("console input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
