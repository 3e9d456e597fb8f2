pub mod card;
pub mod mana;

pub use card::{card_types, Card, CardLayout, FaceView, Side};
pub use mana::{sort_mana, ManaScanner, COLOR_ORDER};
