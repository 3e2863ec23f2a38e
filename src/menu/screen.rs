pub const MAIN_MENU: &str = "
1 = Basic math expressions
2 = Find the given exponent of the given number
3 = Round a number
4 = Find the given percentage of a number
5 = Find the possible base(s) and exponent(s) of the given number
6 = Simplify the n-th root of the given number
7 = Find the divisors of the given number
8 = Settings

TIP: To come back to this menu at any time, type \"back\". Type \"quit\" to leave.
";

pub const SETTINGS_MENU: &str = "
===============SETTINGS===============

1 = Change welcome message
2 = Toggle framed welcome message
3 = Reset welcome message
";

pub const MAIN_PROMPT: &str = "Which option would you like to choose(1/2/3/4/5/6/7/8)?: ";
pub const SETTINGS_PROMPT: &str = "Which setting would you like to change(1/2/3)?: ";

/// States of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Expression,
    Power,
    Round,
    Percentage,
    PerfectPowers,
    Root,
    Divisors,
    Settings,
    Quit,
}

impl Screen {
    /// Maps a main menu choice to its screen
    pub fn from_choice(choice: &str) -> Option<Screen> {
        match choice.trim() {
            "1" => Some(Screen::Expression),
            "2" => Some(Screen::Power),
            "3" => Some(Screen::Round),
            "4" => Some(Screen::Percentage),
            "5" => Some(Screen::PerfectPowers),
            "6" => Some(Screen::Root),
            "7" => Some(Screen::Divisors),
            "8" => Some(Screen::Settings),
            _ => None,
        }
    }
}
