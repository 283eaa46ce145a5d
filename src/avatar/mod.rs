//! Avatar customizer — builds the character that accompanies the user.

pub mod customizer;
pub mod model;

pub use customizer::{AvatarCustomizer, Finalize};
pub use model::{AccessoryOption, AvatarAppearance, ClothingStyle, HairStyle};
