use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Handle a terminal event and return true if the board should close
pub fn handle_event(event: Event) -> bool {
    let Event::Key(k) = event else {
        return false;
    };

    // Only process key press events, ignore releases and repeats
    if k.kind != KeyEventKind::Press {
        return false;
    }

    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}
