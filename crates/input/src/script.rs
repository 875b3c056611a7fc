//! Plain-text input scripts for headless runs.
//!
//! One line per tick. Tokens are separated by whitespace:
//!
//! ```text
//! # comment
//! select:1 place          # select dirt, place on the player's tile
//! 30* hold:d              # hold right for 30 ticks
//! hold:wd fire:1,0        # move up-right and fire to the right
//! break:4,-2              # break a specific tile
//! wait                    # one idle tick
//! quit
//! ```
//!
//! A leading `N*` repeats the line `N` times. Lines that are empty after
//! stripping comments are ignored.

use glam::Vec2;
use tileworld_common::TilePos;

use crate::intent::{HeldDirections, HotbarSlot, Intent, TickInput};

/// Largest accepted `N*` repeat count.
pub const MAX_REPEAT: usize = 100_000;
/// Largest number of ticks one script may expand to.
pub const MAX_SCRIPT_TICKS: usize = 1_000_000;

/// Errors from [`parse_script`]. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown token `{token}`")]
    UnknownToken { line: usize, token: String },
    #[error("line {line}: invalid argument `{arg}` for `{token}`")]
    BadArgument {
        line: usize,
        token: String,
        arg: String,
    },
    #[error("line {line}: invalid repeat count `{count}`")]
    BadRepeat { line: usize, count: String },
}

/// Parse a script into one [`TickInput`] per tick.
pub fn parse_script(text: &str) -> Result<Vec<TickInput>, ScriptError> {
    let mut ticks = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let body = raw.split('#').next().unwrap_or_default().trim();
        if body.is_empty() {
            continue;
        }

        let mut tokens = body.split_whitespace().peekable();
        let mut repeat = 1usize;
        if let Some(count) = tokens.peek().copied().and_then(|t| t.strip_suffix('*')) {
            repeat = match count.parse::<usize>() {
                Ok(n) if (1..=MAX_REPEAT).contains(&n) => n,
                _ => {
                    return Err(ScriptError::BadRepeat {
                        line,
                        count: count.to_string(),
                    });
                }
            };
            tokens.next();
        }

        let mut input = TickInput::default();
        for token in tokens {
            parse_token(line, token, &mut input)?;
        }
        if ticks.len().checked_add(repeat).is_none_or(|n| n > MAX_SCRIPT_TICKS) {
            return Err(ScriptError::BadRepeat {
                line,
                count: repeat.to_string(),
            });
        }
        tracing::trace!(line, repeat, ?input, "parsed script line");
        ticks.extend(std::iter::repeat_n(input, repeat));
    }
    Ok(ticks)
}

fn parse_token(line: usize, token: &str, input: &mut TickInput) -> Result<(), ScriptError> {
    let (name, arg) = match token.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (token, None),
    };
    let bad = |arg: &str| ScriptError::BadArgument {
        line,
        token: name.to_string(),
        arg: arg.to_string(),
    };

    match (name, arg) {
        ("wait", None) => {}
        ("attack", None) => input.intents.push(Intent::Attack),
        ("quit", None) => input.intents.push(Intent::Quit),
        ("hold", Some(keys)) => input.held = parse_held(keys).ok_or_else(|| bad(keys))?,
        ("select", Some(slot)) => {
            let slot = match slot {
                "1" => HotbarSlot::One,
                "2" => HotbarSlot::Two,
                "3" => HotbarSlot::Three,
                other => return Err(bad(other)),
            };
            input.intents.push(Intent::Select(slot));
        }
        ("fire", Some(aim)) => {
            let (x, y) = parse_pair::<f32>(aim).ok_or_else(|| bad(aim))?;
            input.intents.push(Intent::Fire {
                aim: Vec2::new(x, y),
            });
        }
        ("place" | "break", arg) => {
            let target = match arg {
                None => None,
                Some(a) => {
                    let (x, y) = parse_pair::<i32>(a).ok_or_else(|| bad(a))?;
                    Some(TilePos::new(x, y))
                }
            };
            input.intents.push(if name == "place" {
                Intent::Place { target }
            } else {
                Intent::Break { target }
            });
        }
        _ => {
            return Err(ScriptError::UnknownToken {
                line,
                token: token.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_held(keys: &str) -> Option<HeldDirections> {
    let mut held = HeldDirections::default();
    for c in keys.chars() {
        match c {
            'w' => held.up = true,
            's' => held.down = true,
            'a' => held.left = true,
            'd' => held.right = true,
            _ => return None,
        }
    }
    Some(held)
}

fn parse_pair<T: std::str::FromStr>(arg: &str) -> Option<(T, T)> {
    let (a, b) = arg.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
