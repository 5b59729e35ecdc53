use crate::sketch::Action;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Key { key: KeyCode, mods: KeyModifiers },
    Click,
}

pub fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => out.push(InputEvent::Key {
                key: k.code,
                mods: k.modifiers,
            }),
            Event::Mouse(m) if matches!(m.kind, MouseEventKind::Down(_)) => {
                out.push(InputEvent::Click)
            }
            _ => {}
        }
        if out.len() >= 32 {
            break;
        }
    }
    Ok(out)
}

pub fn map_event_to_action(ev: &InputEvent) -> Option<Action> {
    let (key, mods) = match ev {
        InputEvent::Click => return Some(Action::Toggle),
        InputEvent::Key { key, mods } => (*key, *mods),
    };

    if matches!(key, KeyCode::Char('c') | KeyCode::Char('C')) && mods.contains(KeyModifiers::CONTROL)
    {
        return Some(Action::Quit);
    }
    match key {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::AcknowledgeCue),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(Action::AdjustMinutes(1)),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => Some(Action::AdjustMinutes(-1)),
        KeyCode::Tab => Some(Action::NextSketch),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
