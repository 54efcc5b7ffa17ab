use invaders::compute::{begin, init_state, tick, title_round};
use invaders::config::GameConfig;
use invaders::display::{render, Viewport};
use invaders::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn frame_bytes(state: &Round, vp: Viewport) -> Vec<u8> {
    let mut buf = Vec::new();
    render(&mut buf, state, vp).unwrap();
    buf
}

#[test]
fn render_is_idempotent() {
    let mut state = init_state(GameConfig::default());
    state.bullets.push(Bullet { id: 0, x: 400.0, y: 300.0, owner: BulletOwner::Player });
    state.bullets.push(Bullet { id: 1, x: 100.0, y: 400.0, owner: BulletOwner::Invader });
    let vp = Viewport::new(80, 24);

    let first = frame_bytes(&state, vp);
    let second = frame_bytes(&state, vp);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn render_does_not_touch_state() {
    let state = init_state(GameConfig::default());
    let before = state.clone();
    let _ = frame_bytes(&state, Viewport::new(80, 24));
    assert_eq!(state, before);
}

#[test]
fn render_shows_hud() {
    let mut state = init_state(GameConfig::default());
    state.score = 70;
    let text = String::from_utf8(frame_bytes(&state, Viewport::new(80, 24))).unwrap();
    assert!(text.contains("SCORE 0070"));
    assert!(text.contains("LIVES ♥♥♥"));
}

#[test]
fn render_end_banners() {
    let mut state = init_state(GameConfig::default());
    state.status = GameStatus::GameOver;
    let text = String::from_utf8(frame_bytes(&state, Viewport::new(80, 24))).unwrap();
    assert!(text.contains("GAME  OVER"));

    state.status = GameStatus::Win;
    let text = String::from_utf8(frame_bytes(&state, Viewport::new(80, 24))).unwrap();
    assert!(text.contains("YOU  WIN!"));
    assert!(!text.contains("GAME  OVER"));
}

#[test]
fn render_survives_tiny_terminal() {
    let mut state = init_state(GameConfig::default());
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        state = tick(&state, &TickInput { fire: true, ..TickInput::default() }, &mut rng);
    }
    for (cols, rows) in [(1, 1), (5, 3), (10, 6), (200, 60)] {
        let _ = frame_bytes(&state, Viewport::new(cols, rows));
    }
}

#[test]
fn start_screen_lists_controls() {
    let state = title_round(GameConfig::default());
    let text = String::from_utf8(frame_bytes(&state, Viewport::new(80, 24))).unwrap();
    assert!(text.contains("SPACE  INVADERS"));
    assert!(text.contains("Press ENTER to start"));
    // The formation waits behind the title
    assert!(!text.contains("SCORE"));
    assert!(!text.contains("<o>"));
}

#[test]
fn begin_swaps_title_for_field() {
    let state = begin(&title_round(GameConfig::default()));
    let text = String::from_utf8(frame_bytes(&state, Viewport::new(80, 24))).unwrap();
    assert!(!text.contains("Press ENTER to start"));
    assert!(text.contains("SCORE 0000"));
    assert!(text.contains("<o>"));
}

#[test]
fn viewport_maps_field_corners_inside_border() {
    let config = GameConfig::default();
    let vp = Viewport::new(82, 24); // 80 × 20 inner cells

    assert_eq!(vp.to_cell(0.0, 0.0, &config), (1, 2));
    assert_eq!(vp.to_cell(400.0, 300.0, &config), (41, 12));
    // Far edges and overshoot stay on the last inner cell
    assert_eq!(vp.to_cell(800.0, 600.0, &config), (80, 21));
    assert_eq!(vp.to_cell(-5.0, 900.0, &config), (1, 21));
}
