//! Clock state, frame rendering and the redraw loop

use std::io::Write;
use std::time::{Duration, Instant};

use chrono::{NaiveTime, Timelike};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use deskutils_core::terminal::CTRL_C;
use deskutils_core::{KeyPoller, Result};
use tracing::debug;

/// Redraw cadence
pub const DEFAULT_TICK: Duration = Duration::from_millis(1000);

/// Hour display format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourFormat {
    TwentyFourHour,
    TwelveHour,
}

impl HourFormat {
    pub fn toggled(self) -> Self {
        match self {
            HourFormat::TwentyFourHour => HourFormat::TwelveHour,
            HourFormat::TwelveHour => HourFormat::TwentyFourHour,
        }
    }
}

/// Clock configuration
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Time between redraws
    pub tick: Duration,

    /// Format shown on the first frame
    pub format: HourFormat,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            format: HourFormat::TwentyFourHour,
        }
    }
}

impl ClockConfig {
    /// Set redraw interval
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set starting hour format
    pub fn with_format(mut self, format: HourFormat) -> Self {
        self.format = format;
        self
    }
}

/// Transient display state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub format: HourFormat,
    /// Colon shown when set, blanked otherwise
    pub blink: bool,
}

impl ClockState {
    pub fn new(format: HourFormat) -> Self {
        Self { format, blink: true }
    }

    pub fn toggle_format(&mut self) {
        self.format = self.format.toggled();
    }

    /// Advance one redraw
    pub fn tick(&mut self) {
        self.blink = !self.blink;
    }
}

/// What a key press asks the clock to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleFormat,
    Ignore,
}

pub fn handle_key(key: char) -> KeyAction {
    match key {
        'q' | 'Q' | CTRL_C => KeyAction::Quit,
        'h' | 'H' => KeyAction::ToggleFormat,
        _ => KeyAction::Ignore,
    }
}

/// Convert a 0..=23 hour for display, with AM/PM suffix in 12-hour mode
pub fn to_display_hour(hour24: u32, format: HourFormat) -> (u32, Option<&'static str>) {
    match format {
        HourFormat::TwentyFourHour => (hour24, None),
        HourFormat::TwelveHour => {
            let suffix = if hour24 >= 12 { "PM" } else { "AM" };
            let hour = match hour24 {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            (hour, Some(suffix))
        }
    }
}

/// Render one full frame
pub fn render_frame(state: &ClockState, time: NaiveTime) -> String {
    let (hour, suffix) = to_display_hour(time.hour(), state.format);
    let sep = if state.blink { ':' } else { ' ' };
    let suffix = suffix.map(|s| format!(" {}", s)).unwrap_or_default();

    format!(
        "\n\n\t\t+--------------------------+\n\
         \t\t|     DIGITAL CLOCK        |\n\
         \t\t+--------------------------+\n\n\
         \t\t      {:02}{}{:02}{}{:02}{}\n\
         \n\t[H] Toggle 12/24 Hour   [Q] Quit\n",
        hour,
        sep,
        time.minute(),
        sep,
        time.second(),
        suffix
    )
}

fn clear_screen<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Run the clock until a quit key arrives
///
/// # Arguments
/// * `now` - Time source, called once per frame
pub fn run<P, F, W>(
    state: &mut ClockState,
    tick: Duration,
    poller: &mut P,
    mut now: F,
    out: &mut W,
) -> Result<()>
where
    P: KeyPoller,
    F: FnMut() -> NaiveTime,
    W: Write,
{
    loop {
        clear_screen(out)?;
        write!(out, "{}", render_frame(state, now()))?;
        out.flush()?;
        state.tick();

        if wait_for_tick(state, tick, poller)? {
            break;
        }
    }

    clear_screen(out)?;
    writeln!(out, "Clock closed. Goodbye!")?;
    out.flush()?;
    Ok(())
}

/// Poll keys until the tick deadline passes. Returns true on quit.
fn wait_for_tick<P: KeyPoller>(state: &mut ClockState, tick: Duration, poller: &mut P) -> Result<bool> {
    let deadline = Instant::now() + tick;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match poller.poll_key(remaining)? {
            None => return Ok(false),
            Some(key) => match handle_key(key) {
                KeyAction::Quit => return Ok(true),
                KeyAction::ToggleFormat => {
                    state.toggle_format();
                    debug!("Hour format now {:?}", state.format);
                }
                KeyAction::Ignore => {}
            },
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
    }
}
