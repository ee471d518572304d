use crate::app::state::{App, ChartTab};
use crossterm::event::KeyCode;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Tab => {
            app.chart_tab = app.chart_tab.next();
        }
        KeyCode::BackTab => {
            app.chart_tab = app.chart_tab.previous();
        }
        KeyCode::Char('1') => app.chart_tab = ChartTab::Generation,
        KeyCode::Char('2') => app.chart_tab = ChartTab::Emissions,
        KeyCode::Char('3') => app.chart_tab = ChartTab::Mix,
        KeyCode::Left => app.select_previous_country(),
        KeyCode::Right => app.select_next_country(),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::test_actions;
    use mena_energy_tracker::LoadPhase;

    fn app() -> App {
        let (actions, _rx) = test_actions();
        App::new(actions, "gemini-2.5-flash".to_string())
    }

    #[tokio::test]
    async fn r_refreshes_only_outside_loading() {
        let mut app = app();

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.load.phase(), LoadPhase::Idle);

        app.start();
        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.load.phase(), LoadPhase::Loading);
        assert_eq!(app.status_message, "Analysis already in progress");
    }

    #[tokio::test]
    async fn help_swallows_keys_until_closed() {
        let mut app = app();

        handle_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn number_keys_pick_chart_tab() {
        let mut app = app();

        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.chart_tab, ChartTab::Mix);

        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.chart_tab, ChartTab::Generation);

        handle_input(&mut app, KeyCode::BackTab);
        assert_eq!(app.chart_tab, ChartTab::Mix);
    }
}
