//! Scripted input for the native host
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! press KEY       key down        release KEY   key up
//! tap KEY         down then up    wait MS       advance the clock
//! click X Y       primary press + release at window pixel (X, Y), y up
//! rclick X Y      secondary press + release
//! frames N        run N frames    status        print a status line
//! dump            print the current frame as a JSON display list
//! ```
//!
//! Clicks take no time, so two `click`s in a row form a double click;
//! put a `wait` between them for two single clicks.

use std::io::Write;

use glam::Vec2;
use thiserror::Error;

use crate::consts::FRAME_MS;
use crate::renderer::{DisplayList, draw_scene};
use crate::sim::{Button, InputEvent, Key, Scene};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode frame: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Press(Key),
    Release(Key),
    Tap(Key),
    Click { pos: Vec2, button: Button },
    Wait(u64),
    Frames(u32),
    Status,
    Dump,
}

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        steps.push(parse_line(line).map_err(|message| ScriptError::Syntax {
            line: index + 1,
            message,
        })?);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let args = &words[1..];

    let step = match words[0].to_ascii_lowercase().as_str() {
        "press" => Step::Press(key_arg(args)?),
        "release" => Step::Release(key_arg(args)?),
        "tap" => Step::Tap(key_arg(args)?),
        "click" => Step::Click {
            pos: point_arg(args)?,
            button: Button::Primary,
        },
        "rclick" => Step::Click {
            pos: point_arg(args)?,
            button: Button::Secondary,
        },
        "wait" => Step::Wait(number_arg(args)?),
        "frames" => Step::Frames(number_arg(args)?),
        "status" => Step::Status,
        "dump" => Step::Dump,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(step)
}

fn key_arg(args: &[&str]) -> Result<Key, String> {
    match args {
        [name] => Key::from_name(name).ok_or_else(|| format!("unknown key '{}'", name)),
        _ => Err("expected one key name".to_string()),
    }
}

fn point_arg(args: &[&str]) -> Result<Vec2, String> {
    match args {
        [x, y] => {
            let x = x.parse::<f32>().map_err(|_| format!("bad x '{}'", x))?;
            let y = y.parse::<f32>().map_err(|_| format!("bad y '{}'", y))?;
            Ok(Vec2::new(x, y))
        }
        _ => Err("expected X and Y pixel coordinates".to_string()),
    }
}

fn number_arg<T: std::str::FromStr>(args: &[&str]) -> Result<T, String> {
    match args {
        [n] => n.parse::<T>().map_err(|_| format!("bad number '{}'", n)),
        _ => Err("expected one number".to_string()),
    }
}

/// Plays steps against a scene with a virtual millisecond clock
pub struct ScriptRunner<W: Write> {
    pub scene: Scene,
    clock_ms: u64,
    out: W,
}

impl<W: Write> ScriptRunner<W> {
    pub fn new(scene: Scene, out: W) -> Self {
        Self {
            scene,
            clock_ms: 0,
            out,
        }
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<(), ScriptError> {
        for step in steps {
            self.step(step)?;
        }
        Ok(())
    }

    pub fn step(&mut self, step: &Step) -> Result<(), ScriptError> {
        match *step {
            Step::Press(key) => self.scene.handle(&InputEvent::key_down(key)),
            Step::Release(key) => self.scene.handle(&InputEvent::key_up(key)),
            Step::Tap(key) => {
                self.scene.handle(&InputEvent::key_down(key));
                self.scene.handle(&InputEvent::key_up(key));
            }
            Step::Click { pos, button } => {
                self.scene
                    .handle(&InputEvent::pointer_down(pos, button, self.clock_ms));
                self.scene
                    .handle(&InputEvent::pointer_up(pos, button, self.clock_ms));
            }
            Step::Wait(ms) => self.clock_ms += ms,
            Step::Frames(n) => {
                for _ in 0..n {
                    self.scene.frame();
                    self.clock_ms += FRAME_MS;
                }
            }
            Step::Status => writeln!(self.out, "{}", self.scene.status_line())?,
            Step::Dump => {
                let mut list = DisplayList::new();
                draw_scene(&self.scene, &mut list);
                writeln!(self.out, "{}", list.to_json()?)?;
            }
        }
        Ok(())
    }
}
