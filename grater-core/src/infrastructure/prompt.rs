use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use crate::error::GraterError;
use crate::ports::OverwritePrompt;

const AFFIRMATIVE: [&str; 5] = ["y", "Y", "yes", "Yes", "YES"];

pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE.contains(&answer.trim())
}

/// Asks on `writer` and reads a single answer line from `reader`.
pub struct LinePrompt<R, W> {
    reader: RefCell<R>,
    writer: RefCell<W>,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: RefCell::new(reader),
            writer: RefCell::new(writer),
        }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> OverwritePrompt for LinePrompt<R, W> {
    fn confirm_overwrite(&self, project: &str) -> Result<bool, GraterError> {
        {
            let mut writer = self.writer.borrow_mut();
            write!(
                writer,
                "The project you are trying to create, {}, already exists. Are you sure \
                 you want to initialize this project again and overwrite existing files (y/[n])? ",
                project
            )?;
            writer.flush()?;
        }

        let mut line = String::new();
        self.reader.borrow_mut().read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

/// Non-interactive answer used with `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl OverwritePrompt for AssumeYes {
    fn confirm_overwrite(&self, _project: &str) -> Result<bool, GraterError> {
        Ok(true)
    }
}
