//! Render dispatch: turns [`Output`] requests into device calls. This is the
//! only place that touches the matrix, the text display or the buzzer.

use crate::config::{LCD_COLS, VIEW_SIZE};
use crate::game::leaderboard::Entry;
use crate::game::viewport::{Surface, Tile};
use crate::io::{AudioSink, DisplaySurface, Glyph, TextDisplay};
use crate::machine::about_window;
use crate::output::{Output, Screen, SettingsItem};

pub const GLYPH_HEART: u8 = 0;
pub const GLYPH_ARROW: u8 = 1;
pub const GLYPH_BOMB: u8 = 2;

const GLYPHS: [(u8, Glyph); 3] = [
    (
        GLYPH_HEART,
        Glyph {
            rows: [0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000],
            symbol: '♥',
        },
    ),
    (
        GLYPH_ARROW,
        Glyph {
            rows: [0b01000, 0b01100, 0b01110, 0b01111, 0b01110, 0b01100, 0b01000, 0b00000],
            symbol: '►',
        },
    ),
    (
        GLYPH_BOMB,
        Glyph {
            rows: [0b00010, 0b00100, 0b01110, 0b11111, 0b11111, 0b11111, 0b01110, 0b00000],
            symbol: '●',
        },
    ),
];

const MAX_HEARTS: u8 = 3;
const LIVES_COL: usize = LCD_COLS - MAX_HEARTS as usize;

/// Applies one request. `Hold` is the caller's business (it blocks).
pub fn dispatch(
    output: &Output,
    matrix: &mut impl DisplaySurface,
    lcd: &mut impl TextDisplay,
    audio: &mut impl AudioSink,
) {
    match output {
        Output::Screen(screen) => draw_screen(screen, lcd),
        Output::Viewport {
            surface,
            player_on,
            bomb_on,
        } => draw_viewport(surface, *player_on, *bomb_on, matrix),
        Output::Cell { row, col, on } => matrix.set_cell(*row, *col, *on),
        Output::FillMatrix(on) => {
            for row in 0..VIEW_SIZE {
                for col in 0..VIEW_SIZE {
                    matrix.set_cell(row, col, *on);
                }
            }
        }
        Output::Stats { time, score } => {
            lcd.move_cursor(5, 0);
            lcd.write_text(&format!("{time:<3}"));
            lcd.move_cursor(7, 1);
            lcd.write_text(&format!("{score:<5}"));
        }
        Output::Lives(lives) => {
            lcd.move_cursor(LIVES_COL, 0);
            lcd.write_text(&" ".repeat(MAX_HEARTS as usize));
            lcd.move_cursor(LIVES_COL, 0);
            for _ in 0..(*lives).min(MAX_HEARTS) {
                lcd.write_glyph(GLYPH_HEART);
            }
        }
        Output::TextBrightness(level) => lcd.set_backlight(*level),
        Output::MatrixBrightness(level) => matrix.set_brightness(*level),
        Output::Tone { freq, duration } => audio.play_tone(*freq, *duration),
        Output::Silence => audio.stop(),
        Output::LoadGlyphs => {
            for (id, glyph) in GLYPHS {
                lcd.define_glyph(id, glyph);
            }
        }
        Output::Hold(_) => {}
    }
}

fn draw_viewport(
    surface: &Surface,
    player_on: bool,
    bomb_on: bool,
    matrix: &mut impl DisplaySurface,
) {
    for (r, row) in surface.tiles.iter().enumerate() {
        for (c, tile) in row.iter().enumerate() {
            let on = match tile {
                Tile::Player => player_on,
                Tile::Bomb => bomb_on,
                tile => tile.is_solid(),
            };
            matrix.set_cell(r, c, on);
        }
    }
}

fn write_row(lcd: &mut impl TextDisplay, row: usize, text: &str) {
    lcd.move_cursor(0, row);
    lcd.write_text(&format!("{text:<width$}", width = LCD_COLS));
}

fn write_pointer_row(lcd: &mut impl TextDisplay, row: usize, text: &str) {
    lcd.move_cursor(0, row);
    lcd.write_glyph(GLYPH_ARROW);
    lcd.write_text(&format!("{text:<width$}", width = LCD_COLS - 1));
}

fn level_bar(level: u8, max: u8) -> String {
    let filled = "#".repeat(level as usize);
    let empty = ".".repeat(max.saturating_sub(level) as usize);
    format!("{filled}{empty}")
}

fn highscore_row(slot: usize, entry: &Entry) -> String {
    format!("{}. {} {:>6}", slot + 1, entry.name_str(), entry.score)
}

fn draw_screen(screen: &Screen, lcd: &mut impl TextDisplay) {
    lcd.clear();
    match screen {
        Screen::Welcome => {
            write_row(lcd, 0, "  Matrix Bomber");
            write_row(lcd, 1, "    Welcome!");
        }
        Screen::Menu(item) => {
            write_pointer_row(lcd, 0, item.label());
            write_row(lcd, 1, &format!(" {}", item.following().map_or("", |i| i.label())));
        }
        Screen::Settings(item) => {
            write_pointer_row(lcd, 0, item.label());
            write_row(lcd, 1, "<back  edit>");
        }
        Screen::SettingsInput {
            item,
            settings,
            name_cursor,
        } => {
            write_row(lcd, 0, item.label());
            let value = match item {
                SettingsItem::TextBrightness => level_bar(settings.text_brightness, 10),
                SettingsItem::MatrixBrightness => level_bar(settings.matrix_brightness, 15),
                SettingsItem::Sound => (if settings.sound { "On" } else { "Off" }).to_string(),
                SettingsItem::Name => settings
                    .name
                    .iter()
                    .enumerate()
                    .map(|(i, b)| {
                        if i == *name_cursor {
                            format!("[{}]", *b as char)
                        } else {
                            (*b as char).to_string()
                        }
                    })
                    .collect(),
            };
            write_row(lcd, 1, &value);
        }
        Screen::About { offset } => {
            write_row(lcd, 0, "About");
            write_row(lcd, 1, &about_window(*offset));
        }
        Screen::HowTo => {
            write_row(lcd, 0, "Stick: move");
            write_row(lcd, 1, "Button: bomb");
        }
        Screen::Highscores { slot, entry } => {
            write_row(lcd, 0, "Highscores");
            write_row(lcd, 1, &highscore_row(*slot, entry));
        }
        Screen::ResetConfirm => {
            write_row(lcd, 0, "Reset scores?");
            write_row(lcd, 1, "<no        yes>");
        }
        Screen::Difficulty(difficulty) => {
            write_row(lcd, 0, "Difficulty");
            write_row(
                lcd,
                1,
                &format!("{} {}", level_bar(difficulty.level(), 3), difficulty.label()),
            );
        }
        Screen::Playing => {
            write_row(lcd, 0, "Time:");
            lcd.move_cursor(0, 1);
            lcd.write_glyph(GLYPH_BOMB);
            lcd.write_text("Score:");
        }
        Screen::FinalScore { score, rank } => {
            write_row(lcd, 0, &format!("Score: {score}"));
            let verdict = match rank {
                Some(rank) => format!("New record #{}", rank + 1),
                None => "No record".to_string(),
            };
            write_row(lcd, 1, &verdict);
        }
        Screen::Won { score } => {
            write_row(lcd, 0, &format!("You win! {score}"));
            write_row(lcd, 1, "Move to go on");
        }
        Screen::GameOver { score } => {
            write_row(lcd, 0, &format!("Game over {score}"));
            write_row(lcd, 1, "Move to go on");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Pos, Settings, viewport};
    use crate::io::{Buzzer, LcdBuffer, MatrixBuffer};
    use crate::output::MenuItem;

    struct Devices {
        matrix: MatrixBuffer,
        lcd: LcdBuffer,
        buzzer: Buzzer,
    }

    impl Devices {
        fn new() -> Self {
            let mut d = Self {
                matrix: MatrixBuffer::new(),
                lcd: LcdBuffer::new(),
                buzzer: Buzzer::new(),
            };
            d.apply(&Output::LoadGlyphs);
            d
        }

        fn apply(&mut self, output: &Output) {
            dispatch(output, &mut self.matrix, &mut self.lcd, &mut self.buzzer);
        }
    }

    #[test]
    fn menu_screen_points_at_current_item() {
        let mut d = Devices::new();
        d.apply(&Output::Screen(Screen::Menu(MenuItem::StartGame)));
        assert!(d.lcd.row_text(0).starts_with("►Start game"));
        assert!(d.lcd.row_text(1).starts_with(" Settings"));
    }

    #[test]
    fn viewport_lights_border_and_blinking_player() {
        let mut d = Devices::new();
        let surface = viewport::project(&Grid::new(), Pos::new(1, 1), None);
        d.apply(&Output::Viewport {
            surface,
            player_on: false,
            bomb_on: false,
        });
        assert!(d.matrix.get(2, 2));
        assert!(!d.matrix.get(0, 0));
        assert!(!d.matrix.get(3, 3));
        d.apply(&Output::Cell {
            row: 3,
            col: 3,
            on: true,
        });
        assert!(d.matrix.get(3, 3));
    }

    #[test]
    fn stats_and_lives_fill_the_game_screen() {
        let mut d = Devices::new();
        d.apply(&Output::Screen(Screen::Playing));
        d.apply(&Output::Stats { time: 42, score: 120 });
        d.apply(&Output::Lives(2));
        assert_eq!(d.lcd.row_text(0), "Time:42      ♥♥ ");
        assert_eq!(d.lcd.row_text(1), "●Score:120      ");
        d.apply(&Output::Lives(1));
        assert_eq!(d.lcd.row_text(0), "Time:42      ♥  ");
    }

    #[test]
    fn name_editor_brackets_the_cursor() {
        let mut d = Devices::new();
        let settings = Settings {
            name: *b"BOB",
            ..Settings::default()
        };
        d.apply(&Output::Screen(Screen::SettingsInput {
            item: SettingsItem::Name,
            settings,
            name_cursor: 1,
        }));
        assert!(d.lcd.row_text(1).starts_with("B[O]B"));
    }

    #[test]
    fn tone_and_silence_drive_the_buzzer() {
        let mut d = Devices::new();
        d.apply(&Output::Tone {
            freq: 880,
            duration: None,
        });
        assert_eq!(d.buzzer.sounding(), Some(880));
        d.apply(&Output::Silence);
        assert_eq!(d.buzzer.sounding(), None);
    }

    #[test]
    fn brightness_requests_reach_both_displays() {
        let mut d = Devices::new();
        d.apply(&Output::TextBrightness(7));
        d.apply(&Output::MatrixBrightness(12));
        assert_eq!(d.lcd.backlight, 7);
        assert_eq!(d.matrix.brightness, 12);
    }
}
