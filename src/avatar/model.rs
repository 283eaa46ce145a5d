//! Avatar data model — the appearance record and its option catalogs.
//!
//! Wire names stay in Portuguese to match the shape the profile service
//! stores under `avatar_data`. Colors are hex strings straight from the
//! palettes below.

use serde::{Deserialize, Serialize};

/// Hair style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HairStyle {
    #[serde(rename = "curto")]
    Short,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "longo")]
    Long,
    #[serde(rename = "careca")]
    Bald,
}

impl HairStyle {
    pub const ALL: [HairStyle; 4] = [Self::Short, Self::Medium, Self::Long, Self::Bald];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Curto",
            Self::Medium => "Médio",
            Self::Long => "Longo",
            Self::Bald => "Careca",
        }
    }
}

/// Clothing style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClothingStyle {
    #[serde(rename = "casual")]
    Casual,
    #[serde(rename = "esportivo")]
    Sporty,
    #[serde(rename = "formal")]
    Formal,
    #[serde(rename = "confortavel")]
    Comfy,
}

impl ClothingStyle {
    pub const ALL: [ClothingStyle; 4] = [Self::Casual, Self::Sporty, Self::Formal, Self::Comfy];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Sporty => "Esportivo",
            Self::Formal => "Formal",
            Self::Comfy => "Confortável",
        }
    }
}

/// The avatar's appearance, mutated directly by the customizer and written
/// into the profile row when finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarAppearance {
    #[serde(rename = "corPele")]
    pub skin_color: String,
    #[serde(rename = "tipoCabelo")]
    pub hair_style: HairStyle,
    #[serde(rename = "corCabelo")]
    pub hair_color: String,
    #[serde(rename = "tipoRoupa")]
    pub clothing_style: ClothingStyle,
    #[serde(rename = "corRoupa")]
    pub clothing_color: String,
    #[serde(rename = "acessorios", default)]
    pub accessories: Vec<String>,
}

impl Default for AvatarAppearance {
    fn default() -> Self {
        Self {
            skin_color: SKIN_COLORS[0].to_string(),
            hair_style: HairStyle::Short,
            hair_color: "#4A3728".to_string(),
            clothing_style: ClothingStyle::Casual,
            clothing_color: CLOTHING_COLORS[0].to_string(),
            accessories: Vec::new(),
        }
    }
}

/// Skin tone palette.
pub const SKIN_COLORS: [&str; 6] = [
    "#FFD1A3", "#F0C090", "#E8B896", "#D4A574", "#C68642", "#8D5524",
];

/// Hair color palette.
pub const HAIR_COLORS: [&str; 6] = [
    "#000000", "#4A3728", "#8B4513", "#D2691E", "#FFD700", "#FF6347",
];

/// Clothing color palette.
pub const CLOTHING_COLORS: [&str; 6] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899",
];

/// An accessory the avatar can wear. Premium items unlock with levels and
/// stay locked for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryOption {
    pub id: &'static str,
    pub name: &'static str,
    pub premium: bool,
}

/// Accessory catalog.
pub const ACCESSORY_OPTIONS: [AccessoryOption; 5] = [
    AccessoryOption {
        id: "oculos",
        name: "Óculos",
        premium: false,
    },
    AccessoryOption {
        id: "bone",
        name: "Boné",
        premium: false,
    },
    AccessoryOption {
        id: "relogio",
        name: "Relógio",
        premium: false,
    },
    AccessoryOption {
        id: "fone",
        name: "Fone de Ouvido",
        premium: true,
    },
    AccessoryOption {
        id: "corrente",
        name: "Corrente",
        premium: true,
    },
];

/// Look up an accessory by id.
pub fn accessory(id: &str) -> Option<&'static AccessoryOption> {
    ACCESSORY_OPTIONS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_appearance_matches_palettes() {
        let appearance = AvatarAppearance::default();
        assert_eq!(appearance.skin_color, "#FFD1A3");
        assert_eq!(appearance.hair_style, HairStyle::Short);
        assert_eq!(appearance.hair_color, "#4A3728");
        assert_eq!(appearance.clothing_style, ClothingStyle::Casual);
        assert_eq!(appearance.clothing_color, "#3B82F6");
        assert!(appearance.accessories.is_empty());
        assert!(HAIR_COLORS.contains(&appearance.hair_color.as_str()));
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let appearance = AvatarAppearance {
            hair_style: HairStyle::Bald,
            clothing_style: ClothingStyle::Sporty,
            accessories: vec!["oculos".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&appearance).unwrap();
        assert_eq!(json["corPele"], "#FFD1A3");
        assert_eq!(json["tipoCabelo"], "careca");
        assert_eq!(json["tipoRoupa"], "esportivo");
        assert_eq!(json["acessorios"][0], "oculos");
    }

    #[test]
    fn accessory_lookup() {
        assert!(!accessory("oculos").unwrap().premium);
        assert!(accessory("fone").unwrap().premium);
        assert!(accessory("chapeu").is_none());
    }
}
