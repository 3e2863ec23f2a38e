use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, info, warn};

use crate::expression::{Number, evaluate};
use crate::menu::errors::MenuError;
use crate::menu::screen::{MAIN_MENU, MAIN_PROMPT, SETTINGS_MENU, SETTINGS_PROMPT, Screen};
use crate::operations::{
    divisors, percentage, perfect_powers, power, round_half_even, simplify_root,
};
use crate::settings::{Settings, SettingsStore};

/// One line read at a prompt
enum Reply {
    Line(String),
    Back,
    Quit,
}

/// A parsed value read at a prompt, or a navigation request
enum Input<T> {
    Value(T),
    Back,
    Quit,
}

/// Unwraps a parsed value, leaving the current screen on `back` or `quit`
macro_rules! value_or_leave {
    ($input:expr) => {
        match $input {
            Input::Value(value) => value,
            Input::Back => return Ok(Screen::Main),
            Input::Quit => return Ok(Screen::Quit),
        }
    };
}

/// Interactive calculator session over any line-based input and output
pub struct Session<R, W> {
    input: R,
    output: W,
    store: SettingsStore,
    settings: Settings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded from `store`.
    pub fn new(input: R, output: W, store: SettingsStore) -> Result<Self, MenuError> {
        let settings = store.load()?;
        Ok(Self {
            input,
            output,
            store,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs screens until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), MenuError> {
        let mut screen = Screen::Main;
        while screen != Screen::Quit {
            info!("Entering screen {:?}", screen);
            screen = match screen {
                Screen::Main => self.main_menu()?,
                Screen::Expression => self.expression_screen()?,
                Screen::Power => self.power_screen()?,
                Screen::Round => self.round_screen()?,
                Screen::Percentage => self.percentage_screen()?,
                Screen::PerfectPowers => self.perfect_powers_screen()?,
                Screen::Root => self.root_screen()?,
                Screen::Divisors => self.divisors_screen()?,
                Screen::Settings => self.settings_screen()?,
                Screen::Quit => Screen::Quit,
            };
        }
        info!("Session finished");
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Reply, MenuError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(Reply::Quit);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();

        match line.trim().to_lowercase().as_str() {
            "back" => Ok(Reply::Back),
            "quit" | "exit" => Ok(Reply::Quit),
            _ => Ok(Reply::Line(line)),
        }
    }

    /// Prompts until the reply parses as `T`
    fn read_value<T: FromStr>(&mut self, label: &str) -> Result<Input<T>, MenuError> {
        loop {
            match self.prompt(label)? {
                Reply::Line(text) => match text.trim().parse::<T>() {
                    Ok(value) => return Ok(Input::Value(value)),
                    Err(_) => {
                        warn!("Rejected numeric input '{}'", text);
                        writeln!(self.output, "Error: invalid number '{}'", text.trim())?;
                    }
                },
                Reply::Back => return Ok(Input::Back),
                Reply::Quit => return Ok(Input::Quit),
            }
        }
    }

    fn main_menu(&mut self) -> Result<Screen, MenuError> {
        writeln!(self.output, "{}", self.settings.welcome_banner())?;
        writeln!(self.output, "{}", MAIN_MENU)?;

        match self.prompt(MAIN_PROMPT)? {
            Reply::Line(choice) => match Screen::from_choice(&choice) {
                Some(screen) => Ok(screen),
                None => {
                    writeln!(self.output, "Invalid option.")?;
                    Ok(Screen::Main)
                }
            },
            Reply::Back => Ok(Screen::Main),
            Reply::Quit => Ok(Screen::Quit),
        }
    }

    fn expression_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            match self.prompt("> ")? {
                Reply::Line(text) => match evaluate(&text) {
                    Ok(result) => writeln!(self.output, "= {}", result)?,
                    Err(e) => writeln!(self.output, "Error: {}", e)?,
                },
                Reply::Back => return Ok(Screen::Main),
                Reply::Quit => return Ok(Screen::Quit),
            }
        }
    }

    fn power_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let base = value_or_leave!(self.read_value::<f64>("Base: ")?);
            let exponent = value_or_leave!(self.read_value::<f64>("Exponent: ")?);
            match power(base, exponent) {
                Ok(value) => writeln!(self.output, "> {}", Number::Float(value))?,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    fn round_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let value = value_or_leave!(self.read_value::<f64>("> ")?);
            match round_half_even(value) {
                Ok(rounded) => writeln!(self.output, "> {}", rounded)?,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    fn percentage_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let number = value_or_leave!(self.read_value::<f64>("Number: ")?);
            let percent = value_or_leave!(self.read_value::<f64>("Percentage: ")?);
            writeln!(self.output, "> {}", Number::Float(percentage(number, percent)))?;
        }
    }

    fn perfect_powers_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let number = value_or_leave!(self.read_value::<i64>("> ")?);
            let found = perfect_powers(number);
            if found.is_empty() {
                writeln!(self.output, "{} cannot be expressed", number)?;
            }
            for form in found {
                writeln!(self.output, "{}", form)?;
            }
        }
    }

    fn root_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let number = value_or_leave!(self.read_value::<i64>("Enter the number: ")?);
            let degree = value_or_leave!(self.read_value::<u32>("Enter the degree of the root: ")?);
            match simplify_root(number, degree) {
                Ok(form) => writeln!(self.output, "{}", form)?,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    fn divisors_screen(&mut self) -> Result<Screen, MenuError> {
        loop {
            let number = value_or_leave!(self.read_value::<i64>("> ")?);
            match divisors(number) {
                Ok(found) => {
                    for divisor in found {
                        writeln!(self.output, "{}", divisor)?;
                    }
                }
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    fn settings_screen(&mut self) -> Result<Screen, MenuError> {
        writeln!(self.output, "{}", SETTINGS_MENU)?;

        let choice = match self.prompt(SETTINGS_PROMPT)? {
            Reply::Line(choice) => choice,
            Reply::Back => return Ok(Screen::Main),
            Reply::Quit => return Ok(Screen::Quit),
        };

        match choice.trim() {
            "1" => {
                let message = match self.prompt("New welcome message: ")? {
                    Reply::Line(message) => message,
                    Reply::Back => return Ok(Screen::Main),
                    Reply::Quit => return Ok(Screen::Quit),
                };
                self.settings.welcome_message = Some(message);
                self.persist()?;
            }
            "2" => {
                self.settings.framed_welcome = !self.settings.framed_welcome;
                let state = if self.settings.framed_welcome { "ON" } else { "OFF" };
                writeln!(self.output, "Framed welcome message is now {}", state)?;
                self.persist()?;
            }
            "3" => {
                if self.settings.welcome_message.take().is_some() {
                    self.persist()?;
                } else {
                    writeln!(self.output, "You haven't changed the welcome message yet!")?;
                }
            }
            _ => writeln!(self.output, "Invalid option.")?,
        }

        Ok(Screen::Main)
    }

    /// Saves the current settings, reporting failures without ending the session
    fn persist(&mut self) -> Result<(), MenuError> {
        match self.store.save(&self.settings) {
            Ok(()) => writeln!(self.output, "Changes saved successfully!")?,
            Err(e) => {
                warn!("Could not save settings: {}", e);
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }
}
