use neon_fx::fx2d::{Effect2d, FloatingShapes, NetworkOptions, ParticleNetwork, ShapesOptions};
use neon_fx::geom::Size;
use neon_fx::widgets::terminal::{self, FALLBACK};
use neon_fx::widgets::typed::Phase;
use neon_fx::widgets::{BackToTop, BackToTopOptions, Carousel, CarouselOptions, TypedOptions, TypedText};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn inside(x: f64, y: f64, size: Size) -> bool {
    (0.0..size.width).contains(&x) && (0.0..size.height).contains(&y)
}

#[test]
fn network_and_shapes_follow_every_resize() {
    let sizes = [
        Size::new(1200.0, 800.0),
        Size::new(333.0, 517.0),
        Size::new(1920.0, 1080.0),
        Size::new(10.0, 10.0),
    ];
    let mut network = ParticleNetwork::new(NetworkOptions::default(), sizes[0], StdRng::seed_from_u64(1));
    let mut shapes = FloatingShapes::new(ShapesOptions::default(), sizes[0], StdRng::seed_from_u64(2));
    for size in sizes {
        network.resize(size);
        shapes.resize(size);
        let area = size.width * size.height;
        assert_eq!(network.particles().len(), (area / 8000.0).floor() as usize);
        assert_eq!(shapes.shapes().len(), (area / 18000.0).floor() as usize);
        assert!(network.particles().iter().all(|p| inside(p.x, p.y, size)));
        assert!(shapes.shapes().iter().all(|s| inside(s.x, s.y, size)));
    }
}

fn collect_changes(typed: &mut TypedText, until_index: usize) -> Vec<String> {
    let mut seen = Vec::new();
    for _ in 0..100_000 {
        if typed.advance(0.01) {
            seen.push(typed.text().to_owned());
            if typed.index() == until_index {
                return seen;
            }
        }
    }
    panic!("typed text never reached phrase {until_index}");
}

#[test]
fn typed_text_shows_each_prefix_once_per_direction() {
    let mut typed = TypedText::new(TypedOptions {
        texts: vec!["abc".into(), "de".into()],
        ..TypedOptions::default()
    })
    .unwrap();

    assert_eq!(collect_changes(&mut typed, 1), ["a", "ab", "abc", "ab", "a", ""]);
    assert_eq!(typed.phase(), Phase::Typing);
    assert_eq!(collect_changes(&mut typed, 0), ["d", "de", "d", ""]);
}

#[test]
fn terminal_normalizes_input() {
    assert_eq!(terminal::submit("  HELP "), terminal::submit("help"));
    let [echo, reply] = terminal::submit("  HELP ").unwrap();
    assert_eq!(echo, "> help");
    assert!(reply.starts_with("Available commands"));
    assert_eq!(terminal::respond("sudo rm -rf"), FALLBACK);
    assert!(terminal::submit("   ").is_none());
}

#[test]
fn terminal_help_lists_every_command() {
    let help = terminal::respond("help");
    for command in terminal::commands() {
        assert!(help.contains(command), "help does not mention {command}");
    }
}

#[test]
fn carousel_keeps_one_active_slide() {
    let mut carousel = Carousel::new(3, &CarouselOptions::default()).unwrap();
    let active = |c: &Carousel| (0..3).filter(|&i| c.is_active(i)).count();
    assert_eq!(active(&carousel), 1);
    assert!(carousel.is_active(0));

    for expected in [1, 2, 0, 1] {
        assert_eq!(carousel.advance(3.0), None);
        let previous = carousel.active();
        assert_eq!(carousel.advance(3.0), Some((previous, expected)));
        assert_eq!(active(&carousel), 1);
    }
    assert!(Carousel::new(0, &CarouselOptions::default()).is_none());
}

#[test]
fn back_to_top_has_no_hysteresis() {
    let mut button = BackToTop::new(&BackToTopOptions::default());
    assert_eq!(button.scrolled(500.0), None);
    assert_eq!(button.scrolled(500.5), Some(true));
    assert_eq!(button.scrolled(900.0), None);
    assert_eq!(button.scrolled(500.0), Some(false));
    assert_eq!(button.scrolled(501.0), Some(true));
    assert!(button.is_visible());
}
