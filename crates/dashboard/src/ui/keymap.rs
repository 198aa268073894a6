use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Reload,
    NextChart,
    PrevChart,
    SelectChart(usize),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => AppAction::Reload,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => AppAction::NextChart,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => AppAction::PrevChart,
        KeyCode::Char(ch @ '1'..='3') => AppAction::SelectChart(ch as usize - '1' as usize),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_chart_navigation() {
        assert_eq!(map_key(key(KeyCode::Tab)), AppAction::NextChart);
        assert_eq!(map_key(key(KeyCode::Left)), AppAction::PrevChart);
        assert_eq!(map_key(key(KeyCode::Char('1'))), AppAction::SelectChart(0));
        assert_eq!(map_key(key(KeyCode::Char('3'))), AppAction::SelectChart(2));
        assert_eq!(map_key(key(KeyCode::Char('4'))), AppAction::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), AppAction::Quit);
        assert_eq!(map_key(key(KeyCode::Char('r'))), AppAction::Reload);
    }
}
