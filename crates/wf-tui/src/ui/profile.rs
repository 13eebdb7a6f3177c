use crate::stores::fleet_store::FleetState;
use crate::ui::{breadcrumb, render_page, row, row_styled, section};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use wf_core::format::mask_token;
use wf_core::models::OperatorProfile;

pub struct ProfilePage {
    profile: OperatorProfile,
    active_workers: usize,
    max_workers: usize,
    total_tasks: usize,
    screenshots: usize,
    signed_out: bool,
    scroll: usize,
}

impl ProfilePage {
    pub fn from_state(fleet_state: &FleetState, signed_out: bool, scroll: usize) -> Self {
        Self {
            profile: fleet_state.profile.clone(),
            active_workers: fleet_state
                .fleet
                .workers()
                .iter()
                .filter(|w| w.status.is_online())
                .count(),
            max_workers: fleet_state.fleet.max_workers(),
            total_tasks: fleet_state.tasks.len(),
            screenshots: fleet_state.screenshots.len(),
            signed_out,
            scroll,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(breadcrumb(&["Profile"]));
        render_page(self.lines(), self.scroll, block, area, buf);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let p = &self.profile;
        let initial = p
            .username
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {initial} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", p.username),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                p.id.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            section("Account"),
            row("Role", p.role.clone()),
            row("Joined", p.joined_at.format("%d %b %Y").to_string()),
            row("Email", p.email.clone()),
            Line::from(""),
            section("Session"),
        ];

        if self.signed_out {
            lines.push(row_styled(
                "Access token",
                "signed out",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            lines.push(row_styled(
                "Access token",
                mask_token(&p.access_token),
                Style::default().fg(Color::Gray),
            ));
            lines.push(row("Access expires", format!("in {}", p.access_expires_in)));
            lines.push(row("Refresh expires", format!("in {}", p.refresh_expires_in)));
        }
        lines.push(Line::from(""));

        lines.push(section("Activity"));
        lines.push(row(
            "Active workers",
            format!("{} / {}", self.active_workers, self.max_workers),
        ));
        lines.push(row("Total tasks", self.total_tasks.to_string()));
        lines.push(row("Screenshots", self.screenshots.to_string()));
        lines.push(Line::from(""));

        lines.push(section("Danger Zone"));
        if self.signed_out {
            lines.push(Line::from(Span::styled(
                "  Session ended. Run `wf login` to sign in again.",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Sign out of this session",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(vec![
                Span::styled("  [S] ", Style::default().fg(Color::DarkGray)),
                Span::styled("Sign Out", Style::default().fg(Color::Red)),
            ]));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::FleetStore;
    use crate::ui::test_utils::buffer_text;
    use wf_core::MockData;

    fn render(page: &ProfilePage) -> String {
        let area = Rect::new(0, 0, 80, 32);
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf);
        buffer_text(&buf)
    }

    fn state() -> FleetState {
        FleetStore::new(MockData::load().unwrap(), 3).get_state()
    }

    #[test]
    fn test_session_and_activity() {
        let text = render(&ProfilePage::from_state(&state(), false, 0));
        assert!(text.contains("operator@worker-factory.ai"));
        assert!(text.contains("01 Feb 2026"));
        assert!(text.contains("eyJhbG"));
        assert!(!text.contains("eyJzdWIi"));
        assert!(text.contains("in 1h 47m"));
        assert!(text.contains("in 6d 22h"));
        assert!(text.contains("2 / 3"));
        assert!(text.contains("Sign Out"));
    }

    #[test]
    fn test_signed_out_hides_token() {
        let text = render(&ProfilePage::from_state(&state(), true, 0));
        assert!(!text.contains("eyJhbG"));
        assert!(text.contains("signed out"));
        assert!(!text.contains("[S]"));
    }
}
