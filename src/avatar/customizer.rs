//! Avatar customizer — single-screen appearance editor with one final write.

use std::sync::Arc;

use crate::auth::SessionContext;
use crate::profile::ProfileStore;

use super::model::{self, AvatarAppearance, ClothingStyle, HairStyle};

/// Result of a [`AvatarCustomizer::finalize`] call.
#[derive(Debug)]
pub enum Finalize {
    /// Appearance saved; the caller should open the home screen.
    Completed,
    /// No authenticated session; the caller should redirect to login.
    Unauthenticated,
    /// The write failed; the customizer stays open so the user can retry.
    Failed,
    /// A save is already in flight.
    Busy,
}

/// Owns the appearance record for the lifetime of the screen. Every setter
/// mutates directly; there is no per-field validation.
pub struct AvatarCustomizer {
    session: SessionContext,
    profiles: Arc<dyn ProfileStore>,
    appearance: AvatarAppearance,
    busy: bool,
}

impl AvatarCustomizer {
    pub fn new(session: SessionContext, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            session,
            profiles,
            appearance: AvatarAppearance::default(),
            busy: false,
        }
    }

    pub fn appearance(&self) -> &AvatarAppearance {
        &self.appearance
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_skin_color(&mut self, color: impl Into<String>) {
        self.appearance.skin_color = color.into();
    }

    pub fn set_hair_style(&mut self, style: HairStyle) {
        self.appearance.hair_style = style;
    }

    pub fn set_hair_color(&mut self, color: impl Into<String>) {
        self.appearance.hair_color = color.into();
    }

    pub fn set_clothing_style(&mut self, style: ClothingStyle) {
        self.appearance.clothing_style = style;
    }

    pub fn set_clothing_color(&mut self, color: impl Into<String>) {
        self.appearance.clothing_color = color.into();
    }

    /// Toggle an accessory by catalog id. Premium accessories are locked;
    /// toggling one is refused. Returns whether the toggle was applied.
    pub fn toggle_accessory(&mut self, id: &str) -> bool {
        let Some(option) = model::accessory(id) else {
            return false;
        };
        if option.premium {
            return false;
        }
        let list = &mut self.appearance.accessories;
        if let Some(pos) = list.iter().position(|a| a == id) {
            list.remove(pos);
        } else {
            list.push(id.to_string());
        }
        true
    }

    /// Resolve the session and write the appearance into the user's existing
    /// profile row.
    pub async fn finalize(&mut self) -> Finalize {
        if self.busy {
            return Finalize::Busy;
        }
        self.busy = true;
        let outcome = self.finalize_inner().await;
        self.busy = false;
        outcome
    }

    async fn finalize_inner(&mut self) -> Finalize {
        let user = match self.session.resolve().await {
            Ok(Some(user)) => user,
            Ok(None) => return Finalize::Unauthenticated,
            Err(e) => {
                tracing::warn!("Session lookup failed during avatar save: {e}");
                return Finalize::Failed;
            }
        };
        match self
            .profiles
            .update_avatar(user.user_id, &self.appearance)
            .await
        {
            Ok(()) => Finalize::Completed,
            Err(e) => {
                tracing::warn!("Failed to save avatar: {e}");
                Finalize::Failed
            }
        }
    }
}
