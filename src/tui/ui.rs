use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::header::{HEADER_HEIGHT, Header};
use crate::tui::components::MessageList;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Header on top, conversation in the middle, draft at the bottom.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(HEADER_HEIGHT), Min(0), Length(input_height)]);
    let [header_area, main_area, input_area] = layout.areas(frame.area());

    Header::new(
        app.assistant_name.clone(),
        app.status_message.clone(),
        app.model_name.clone(),
    )
    .render(frame, header_area);

    let opacity = tui.opacity();
    MessageList::new(
        &mut tui.message_list,
        &app.conversation,
        &app.assistant_name,
        spinner_frame,
        opacity,
    )
    .render(frame, main_area);

    tui.input_box.spinner_frame = spinner_frame;
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::message::WELCOME_TEXT;
    use crate::test_support::test_app;
    use crate::tui::components::input_box::PLACEHOLDER;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_after_mount() {
        let mut app = test_app();
        update(&mut app, Action::Mount);
        let mut tui = TuiState::new();

        let text = screen_text(&app, &mut tui);
        assert!(text.contains("Hasan"));
        assert!(text.contains("test-model"));
        assert!(text.contains("Merhaba!"));
        assert!(WELCOME_TEXT.starts_with("Merhaba!"));
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_draw_ui_while_loading() {
        let mut app = test_app();
        update(&mut app, Action::Mount);
        update(&mut app, Action::Submit("Selam".into()));
        let mut tui = TuiState::new();
        tui.input_box.disabled = app.is_loading;

        let text = screen_text(&app, &mut tui);
        assert!(text.contains("Selam"));
        assert!(text.contains("Yazıyor..."));
    }
}
