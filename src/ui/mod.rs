pub mod render;

use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::config::{LCD_COLS, LCD_ROWS, MATRIX_BRIGHTNESS_RANGE, VIEW_SIZE};
use crate::io::{Buzzer, LcdBuffer, MatrixBuffer};

const LED_W: u16 = 2;
const MIN_WIDTH: u16 = 44;

/// Draws the emulated console: LED matrix on the left, text display and
/// buzzer/controls on the right.
pub fn draw_console(frame: &mut Frame, matrix: &MatrixBuffer, lcd: &LcdBuffer, buzzer: &Buzzer) {
    let area = frame.size();

    if area.width < MIN_WIDTH {
        let msg = Paragraph::new(format!("RESIZE TERMINAL (min width: {MIN_WIDTH})"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("MATRIX BOMBER"));
        frame.render_widget(msg, area);
        return;
    }

    let cabinet = Block::default()
        .title("MATRIX BOMBER")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let matrix_w = VIEW_SIZE as u16 * LED_W + 2;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(matrix_w + 4), Constraint::Min(LCD_COLS as u16 + 4)])
        .split(cabinet_inner);

    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(VIEW_SIZE as u16 + 2),
            Constraint::Min(1),
        ])
        .split(cols[0]);
    let h_center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(matrix_w), Constraint::Min(1)])
        .split(v_center[1]);

    draw_matrix(frame, matrix, h_center[1]);
    draw_sidebar(frame, lcd, buzzer, cols[1]);
}

fn led_color(brightness: u8) -> Color {
    let (lo, hi) = MATRIX_BRIGHTNESS_RANGE;
    let span = u16::from(hi - lo).max(1);
    let level = u16::from(brightness.clamp(lo, hi) - lo);
    let red = 80 + (175 * level / span) as u8;
    Color::Rgb(red, 16, 16)
}

fn draw_matrix(frame: &mut Frame, matrix: &MatrixBuffer, rect: Rect) {
    let lit = Style::default().fg(led_color(matrix.brightness));
    let dark = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = matrix
        .cells
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&on| {
                    if on {
                        Span::styled("██", lit)
                    } else {
                        Span::styled("··", dark)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("MATRIX").borders(Borders::ALL));
    frame.render_widget(paragraph, rect);
}

fn draw_sidebar(frame: &mut Frame, lcd: &LcdBuffer, buzzer: &Buzzer, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(LCD_ROWS as u16 + 2),
                Constraint::Length(3),
                Constraint::Min(7),
            ]
            .as_ref(),
        )
        .split(area);

    // dim backlights render grey, bright ones green-on-black
    let lcd_style = if lcd.backlight >= 5 {
        Style::default().fg(Color::LightGreen).bg(Color::Black)
    } else {
        Style::default().fg(Color::Gray).bg(Color::Black)
    };
    let rows: Vec<Line> = (0..LCD_ROWS)
        .map(|row| Line::styled(lcd.row_text(row), lcd_style))
        .collect();
    let text = Paragraph::new(rows).block(
        Block::default()
            .title(format!("LCD {}", lcd.backlight))
            .borders(Borders::ALL),
    );
    frame.render_widget(text, chunks[0]);

    let tone = match buzzer.sounding() {
        Some(freq) => format!("♪ {freq} Hz"),
        None => "-".to_string(),
    };
    let audio = Paragraph::new(tone).block(Block::default().title("BUZZER").borders(Borders::ALL));
    frame.render_widget(audio, chunks[1]);

    let controls = Paragraph::new("←↑↓→/wasd stick\nspace bomb\nq quit")
        .block(Block::default().title("CONTROLS").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(controls, chunks[2]);
}
