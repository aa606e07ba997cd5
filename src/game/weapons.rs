// Weapon catalog defaults.
// The session owns a mutable copy of this table; prices here are the restart
// baseline (a purchase zeroes the session copy, never the catalog).

use crate::game::session::Weapon;

/// Fixed weapon catalog, in grid order. Index 0 is the free starter weapon
/// every session begins with; the rest unlock by spending damage earnings.
pub static CATALOG: [Weapon; 8] = [
    Weapon {
        id: "punch",
        name: "Punch",
        damage: 5,
        cost: 0,
        icon: "👊",
        color: "#ff6b6b",
        particle_count: 5,
        description: "Basic melee attack",
        rarity: "Common",
        fire_rate: "Fast",
    },
    Weapon {
        id: "bat",
        name: "Bat",
        damage: 10,
        cost: 100,
        icon: "🏏",
        color: "#4ecdc4",
        particle_count: 8,
        description: "Swing with force",
        rarity: "Common",
        fire_rate: "Fast",
    },
    Weapon {
        id: "hammer",
        name: "Hammer",
        damage: 15,
        cost: 250,
        icon: "🔨",
        color: "#ffe66d",
        particle_count: 12,
        description: "Heavy crushing blow",
        rarity: "Uncommon",
        fire_rate: "Medium",
    },
    Weapon {
        id: "knife",
        name: "Knife",
        damage: 20,
        cost: 500,
        icon: "🔪",
        color: "#ff6b9d",
        particle_count: 15,
        description: "Sharp and deadly",
        rarity: "Uncommon",
        fire_rate: "Fast",
    },
    Weapon {
        id: "gun",
        name: "Gun",
        damage: 30,
        cost: 1000,
        icon: "🔫",
        color: "#c44569",
        particle_count: 20,
        description: "Rapid fire weapon",
        rarity: "Rare",
        fire_rate: "Very Fast",
    },
    Weapon {
        id: "bomb",
        name: "Bomb",
        damage: 50,
        cost: 2500,
        icon: "💣",
        color: "#f38181",
        particle_count: 30,
        description: "Explosive damage",
        rarity: "Rare",
        fire_rate: "Medium",
    },
    Weapon {
        id: "lightning",
        name: "Lightning",
        damage: 75,
        cost: 5000,
        icon: "⚡",
        color: "#ffeb3b",
        particle_count: 40,
        description: "Electrifying power",
        rarity: "Epic",
        fire_rate: "Fast",
    },
    Weapon {
        id: "rocket",
        name: "Rocket",
        damage: 100,
        cost: 10000,
        icon: "🚀",
        color: "#ff5722",
        particle_count: 50,
        description: "Ultimate destruction",
        rarity: "Legendary",
        fire_rate: "Medium",
    },
];
