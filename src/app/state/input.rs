use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use super::{AppState, Focus, Suggestions};
use crate::app::events::AppEvent;

impl AppState {
    pub(crate) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, tx).await?,
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            _ => {}
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if is_interrupt(key) {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        // An open notice swallows the key that closes it.
        if self.dismiss_notice() {
            return Ok(());
        }
        match self.focus {
            Focus::Search => self.handle_search_key(key, tx),
            Focus::Dashboard => self.handle_dashboard_key(key, tx).await?,
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Dashboard,
            KeyCode::Enter => {
                self.select_suggestion(self.suggestion_cursor, tx);
            }
            KeyCode::Up => self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1),
            KeyCode::Down => {
                if let Suggestions::Results(results) = &self.suggestions {
                    let last = results.len().saturating_sub(1);
                    self.suggestion_cursor = (self.suggestion_cursor + 1).min(last);
                }
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.query_changed(tx);
                }
            }
            KeyCode::Char(ch) if is_query_char(key, ch) => {
                self.query.push(ch);
                self.query_changed(tx);
            }
            _ => {}
        }
    }

    async fn handle_dashboard_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match key.code {
            KeyCode::Left => {
                self.move_selection(-1);
            }
            KeyCode::Right => {
                self.move_selection(1);
            }
            KeyCode::Home => {
                self.set_selection(0);
            }
            KeyCode::End => {
                self.set_selection(usize::MAX);
            }
            KeyCode::Tab => self.focus = Focus::Search,
            KeyCode::Esc => tx.send(AppEvent::Quit).await?,
            _ => match command_char(key) {
                Some('q') => tx.send(AppEvent::Quit).await?,
                Some('/' | 's') => self.focus = Focus::Search,
                Some('u') => self.toggle_units(),
                Some('g') => {
                    self.detect_location(tx);
                }
                Some(digit @ '1'..='9') => {
                    self.select_day((digit as usize) - ('1' as usize));
                }
                _ => {}
            },
        }
        Ok(())
    }
}

pub(super) fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

fn is_query_char(key: KeyEvent, ch: char) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        && !ch.is_control()
}
