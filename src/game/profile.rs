//! Display identity and the equipped cosmetic.

use uuid::Uuid;

use crate::game::errors::GameError;
use crate::game::notify::Notifier;
use crate::game::types::{InventoryItem, Player};
use crate::validation::validate_profile_name;

/// Rename the player and set their avatar.
pub fn update_profile(
    player: &mut Player,
    name: &str,
    avatar: &str,
    notifier: &mut dyn Notifier,
) -> Result<(), GameError> {
    let name = match validate_profile_name(name) {
        Ok(name) => name,
        Err(e) => {
            notifier.post("Invalid Name");
            return Err(GameError::InvalidName(e.to_string()));
        }
    };
    let avatar = avatar.trim();
    player.username = name;
    if !avatar.is_empty() {
        player.avatar = avatar.to_string();
    }
    notifier.post("Profile Updated.");
    Ok(())
}

/// Equip a held item, or unequip it when it is already equipped.
///
/// Returns the equipped instance after the toggle.
pub fn equip_item(
    player: &mut Player,
    inventory: &[InventoryItem],
    instance_id: Uuid,
    notifier: &mut dyn Notifier,
) -> Result<Option<Uuid>, GameError> {
    if !inventory.iter().any(|i| i.instance_id == instance_id) {
        notifier.post("Item Not In Inventory");
        return Err(GameError::NotFound(format!("item {}", instance_id)));
    }
    if player.equipped_item_id == Some(instance_id) {
        player.equipped_item_id = None;
        notifier.post("Item Unequipped.");
    } else {
        player.equipped_item_id = Some(instance_id);
        notifier.post("Item Equipped.");
    }
    Ok(player.equipped_item_id)
}

/// The item currently worn, if it is still held.
pub fn equipped_item<'a>(player: &Player, inventory: &'a [InventoryItem]) -> Option<&'a InventoryItem> {
    let id = player.equipped_item_id?;
    inventory.iter().find(|i| i.instance_id == id)
}
