//! DOM-free state for the interactive page widgets. The browser binding
//! feeds them events and ticks and mirrors their state into the document.

pub mod carousel;
pub mod controls;
pub mod counter;
pub mod modal;
pub mod parallax;
pub mod reveal;
pub mod terminal;
pub mod tilt;
pub mod trail;
pub mod typed;

pub use carousel::{Carousel, CarouselOptions};
pub use controls::{BackToTop, BackToTopOptions, Preloader, PreloaderOptions};
pub use counter::{Counter, CounterOptions};
pub use modal::{Modal, ModalClick, ModalContent};
pub use parallax::{Parallax, ParallaxOptions};
pub use reveal::RevealRule;
pub use tilt::TiltOptions;
pub use trail::{CursorTrail, TrailOptions};
pub use typed::{TypedOptions, TypedText};
