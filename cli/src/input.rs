use anyhow::Context;
use circuit_escape_core::{Command, Direction};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Maps one input word to a command. Unknown words yield `None`.
pub fn parse_command(word: &str) -> Option<Command> {
    Some(match word.trim().to_ascii_lowercase().as_str() {
        "up" | "w" => Command::Move(Direction::Up),
        "down" | "s" => Command::Move(Direction::Down),
        "left" | "a" => Command::Move(Direction::Left),
        "right" | "d" => Command::Move(Direction::Right),
        "act" | "space" => Command::Act,
        "rotate" | "r" => Command::Rotate,
        "remove" | "delete" => Command::Remove,
        "next" | "tab" => Command::Next,
        "validate" | "v" => Command::Validate,
        "cancel" | "esc" => Command::Cancel,
        "confirm" | "enter" => Command::Confirm,
        _ => return None,
    })
}

fn parse_line(line: &str) -> impl Iterator<Item = Command> + '_ {
    line.split_whitespace().filter_map(|word| {
        let command = parse_command(word);
        if command.is_none() {
            log::warn!("Unknown command {:?}", word);
        }
        command
    })
}

/// What the input source has for the current frame.
#[derive(Debug, PartialEq)]
pub enum Poll {
    Command(Command),
    /// Nothing this frame, more may come later
    Idle,
    Closed,
}

/// Where the frame loop takes its commands from.
pub enum CommandSource {
    /// Pre-recorded commands, fed one per frame
    Script(VecDeque<Command>),
    /// Lines typed on stdin, read on a separate thread
    Stdin(Receiver<Command>),
}

impl CommandSource {
    pub fn from_script(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read script {}", path.display()))?;
        let commands: VecDeque<Command> = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .flat_map(parse_line)
            .collect();
        log::debug!("Loaded {} commands from {}", commands.len(), path.display());
        Ok(Self::Script(commands))
    }

    pub fn stdin() -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                for command in parse_line(&line) {
                    if sender.send(command).is_err() {
                        return;
                    }
                }
            }
            log::debug!("Stdin closed");
        });
        Self::Stdin(receiver)
    }

    /// At most one command per frame, without blocking.
    pub fn poll(&mut self) -> Poll {
        match self {
            Self::Script(commands) => match commands.pop_front() {
                Some(command) => Poll::Command(command),
                None => Poll::Closed,
            },
            Self::Stdin(receiver) => match receiver.try_recv() {
                Ok(command) => Poll::Command(command),
                Err(TryRecvError::Empty) => Poll::Idle,
                Err(TryRecvError::Disconnected) => Poll::Closed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_map_to_commands() {
        assert_eq!(parse_command("up"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command(" Validate "), Some(Command::Validate));
        assert_eq!(parse_command("next"), Some(Command::Next));
        assert_eq!(parse_command("jump"), None);
    }

    #[test]
    fn lines_skip_unknown_words() {
        let commands: Vec<_> = parse_line("act jump  rotate").collect();
        assert_eq!(commands, vec![Command::Act, Command::Rotate]);
    }

    #[test]
    fn script_yields_one_command_per_poll() {
        let mut source = CommandSource::Script(VecDeque::from([Command::Act, Command::Cancel]));

        assert_eq!(source.poll(), Poll::Command(Command::Act));
        assert_eq!(source.poll(), Poll::Command(Command::Cancel));
        assert_eq!(source.poll(), Poll::Closed);
    }

    #[test]
    fn stdin_yields_one_command_per_poll() {
        let (sender, receiver) = mpsc::channel();
        for command in parse_line("right right act") {
            sender.send(command).unwrap();
        }
        let mut source = CommandSource::Stdin(receiver);

        assert_eq!(source.poll(), Poll::Command(Command::Move(Direction::Right)));
        assert_eq!(source.poll(), Poll::Command(Command::Move(Direction::Right)));
        assert_eq!(source.poll(), Poll::Command(Command::Act));
        assert_eq!(source.poll(), Poll::Idle);
        drop(sender);
    }

    #[test]
    fn closed_channel_drains_before_closing() {
        let (sender, receiver) = mpsc::channel();
        sender.send(Command::Act).unwrap();
        sender.send(Command::Confirm).unwrap();
        drop(sender);
        let mut source = CommandSource::Stdin(receiver);

        assert_eq!(source.poll(), Poll::Command(Command::Act));
        assert_eq!(source.poll(), Poll::Command(Command::Confirm));
        assert_eq!(source.poll(), Poll::Closed);
    }
}
