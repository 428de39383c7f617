#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze-crawler engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and the pure algorithm crates. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for collaborators to react to. Read access flows through the world's
//! `query` module, which hands out the grid rectangles, entity collections,
//! and the on-demand minimap projection defined here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the crawl.";

/// Default number of tile columns in a floor grid.
pub const DEFAULT_GRID_COLUMNS: u32 = 20;

/// Default number of tile rows in a floor grid.
pub const DEFAULT_GRID_ROWS: u32 = 20;

/// Default edge length of a single square tile, in world units.
pub const DEFAULT_TILE_LENGTH: f32 = 64.0;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Euclidean distance between two cell coordinates,
    /// measured in whole cells.
    #[must_use]
    pub fn distance(self, other: CellCoord) -> f32 {
        let columns = self.column.abs_diff(other.column) as f32;
        let rows = self.row.abs_diff(other.row) as f32;
        (columns * columns + rows * rows).sqrt()
    }
}

/// Validated description of the discrete tile layout of a floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl GridSpec {
    /// Smallest grid dimension that keeps the carving endpoints strictly
    /// interior.
    pub const MIN_DIMENSION: u32 = 5;

    /// Creates a new grid specification.
    ///
    /// Rejects dimensions below [`Self::MIN_DIMENSION`] and non-positive
    /// tile lengths.
    pub fn new(columns: u32, rows: u32, tile_length: f32) -> Result<Self, GridSpecError> {
        if columns < Self::MIN_DIMENSION || rows < Self::MIN_DIMENSION {
            return Err(GridSpecError::DimensionsTooSmall { columns, rows });
        }
        if tile_length <= 0.0 {
            return Err(GridSpecError::NonPositiveTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// World-space center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> (f32, f32) {
        (
            cell.column() as f32 * self.tile_length + self.tile_length / 2.0,
            cell.row() as f32 * self.tile_length + self.tile_length / 2.0,
        )
    }

    /// Cell containing the provided world-space position, clamped to the
    /// grid bounds.
    #[must_use]
    pub fn cell_of(&self, x: f32, y: f32) -> CellCoord {
        let column = (x / self.tile_length).floor().max(0.0) as u32;
        let row = (y / self.tile_length).floor().max(0.0) as u32;
        CellCoord::new(
            column.min(self.columns.saturating_sub(1)),
            row.min(self.rows.saturating_sub(1)),
        )
    }

    /// Cell at the geometric center of the grid.
    #[must_use]
    pub const fn center_cell(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            tile_length: DEFAULT_TILE_LENGTH,
        }
    }
}

/// Reasons a grid specification may be rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GridSpecError {
    /// Both dimensions must leave room for a strictly interior carving walk.
    #[error("grid dimensions must be at least 5x5 (received {columns}x{rows})")]
    DimensionsTooSmall {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// Tiles must have a positive edge length.
    #[error("tile length must be positive (received {tile_length})")]
    NonPositiveTileLength {
        /// Requested tile edge length.
        tile_length: f32,
    },
}

/// Axis-aligned tile rectangle expressed in world units.
///
/// The grid stores its wall and floor classification as two disjoint
/// collections of these rectangles; every cell of the grid belongs to
/// exactly one of the two collections.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRect {
    /// World-space coordinate of the rectangle's left edge.
    pub x: f32,
    /// World-space coordinate of the rectangle's top edge.
    pub y: f32,
    /// Width of the rectangle in world units.
    pub width: f32,
    /// Height of the rectangle in world units.
    pub height: f32,
}

impl TileRect {
    /// Creates the tile-sized rectangle covering the provided cell.
    #[must_use]
    pub fn from_cell(cell: CellCoord, tile_length: f32) -> Self {
        Self {
            x: cell.column() as f32 * tile_length,
            y: cell.row() as f32 * tile_length,
            width: tile_length,
            height: tile_length,
        }
    }

    /// World-space coordinate of the rectangle's right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// World-space coordinate of the rectangle's bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grid cell anchoring the rectangle's origin.
    #[must_use]
    pub fn cell(&self, tile_length: f32) -> CellCoord {
        CellCoord::new(
            (self.x / tile_length).floor().max(0.0) as u32,
            (self.y / tile_length).floor().max(0.0) as u32,
        )
    }
}

/// Opaque RGB color attached to spawned entities for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl SpriteColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to an enemy within its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Named template of base stats from which a spawned enemy is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Fast melee pest with middling health.
    Goblin,
    /// Slow but durable bruiser.
    Skeleton,
    /// Sluggish low-threat blob.
    Slime,
    /// Fragile and very fast flyer.
    Bat,
}

impl EnemyArchetype {
    /// Every archetype eligible for uniform random selection at spawn time.
    pub const CATALOG: [EnemyArchetype; 4] = [
        EnemyArchetype::Goblin,
        EnemyArchetype::Skeleton,
        EnemyArchetype::Slime,
        EnemyArchetype::Bat,
    ];

    /// Display name of the archetype.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Goblin => "Goblin",
            Self::Skeleton => "Skeleton",
            Self::Slime => "Slime",
            Self::Bat => "Bat",
        }
    }

    /// Body color used by presentation layers.
    #[must_use]
    pub const fn color(&self) -> SpriteColor {
        match self {
            Self::Goblin => SpriteColor::from_rgb(0x4c, 0xaf, 0x50),
            Self::Skeleton => SpriteColor::from_rgb(0xf5, 0xf5, 0xf5),
            Self::Slime => SpriteColor::from_rgb(0x21, 0x96, 0xf3),
            Self::Bat => SpriteColor::from_rgb(0x79, 0x55, 0x48),
        }
    }

    /// Movement speed in world units per simulation step.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        match self {
            Self::Goblin => 1.5,
            Self::Skeleton => 1.2,
            Self::Slime => 0.8,
            Self::Bat => 2.5,
        }
    }

    /// Unscaled base health of the archetype.
    #[must_use]
    pub const fn base_health(&self) -> f32 {
        match self {
            Self::Goblin => 30.0,
            Self::Skeleton => 40.0,
            Self::Slime => 20.0,
            Self::Bat => 15.0,
        }
    }

    /// Unscaled base damage of the archetype.
    #[must_use]
    pub const fn base_damage(&self) -> f32 {
        match self {
            Self::Goblin => 5.0,
            Self::Skeleton => 8.0,
            Self::Slime => 3.0,
            Self::Bat => 4.0,
        }
    }

    /// Experience awarded to the player for defeating the enemy.
    #[must_use]
    pub const fn experience(&self) -> u32 {
        match self {
            Self::Goblin => 10,
            Self::Skeleton => 15,
            Self::Slime => 5,
            Self::Bat => 8,
        }
    }

    /// Display icon used by presentation layers.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Goblin => "\u{1f47a}",
            Self::Skeleton => "\u{1f480}",
            Self::Slime => "\u{1f7e2}",
            Self::Bat => "\u{1f987}",
        }
    }
}

/// Behavioral mode an enemy can occupy; spawns always start idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    /// The enemy has not noticed the player.
    Idle,
    /// The enemy is pursuing a target.
    Chasing,
    /// The enemy is within attack range of its target.
    Attacking,
}

/// A live enemy instance placed on the current floor.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier assigned at spawn time, unique within the floor.
    pub id: EnemyId,
    /// Archetype the instance was derived from.
    pub archetype: EnemyArchetype,
    /// World-space X coordinate of the enemy's center.
    pub x: f32,
    /// World-space Y coordinate of the enemy's center.
    pub y: f32,
    /// Hitbox width in world units.
    pub width: f32,
    /// Hitbox height in world units.
    pub height: f32,
    /// Current health after level and difficulty scaling.
    pub health: f32,
    /// Maximum health after level and difficulty scaling.
    pub max_health: f32,
    /// Damage dealt per attack after level and difficulty scaling.
    pub damage: f32,
    /// Movement speed inherited from the archetype.
    pub speed: f32,
    /// Experience reward inherited from the archetype.
    pub experience: u32,
    /// Floor-plan health multiplier captured at spawn time.
    pub level_health_mult: f32,
    /// Floor-plan damage multiplier captured at spawn time.
    pub level_damage_mult: f32,
    /// Current behavioral mode.
    pub behavior: BehaviorState,
    /// Cell of the enemy's current target, if it has acquired one.
    pub target: Option<CellCoord>,
    /// Minimum delay the enemy must wait between attacks.
    pub attack_cooldown: Duration,
    /// Time elapsed toward the next permitted attack.
    pub attack_elapsed: Duration,
    /// Radius within which the enemy notices the player, in world units.
    pub detection_range: f32,
    /// Radius within which the enemy may strike, in world units.
    pub attack_range: f32,
}

impl Enemy {
    /// Hitbox edge length shared by every enemy archetype.
    pub const HITBOX: f32 = 28.0;

    /// Fixed delay between enemy attacks.
    pub const ATTACK_COOLDOWN: Duration = Duration::from_millis(1000);

    /// Fixed player-detection radius in world units.
    pub const DETECTION_RANGE: f32 = 200.0;

    /// Fixed attack radius in world units.
    pub const ATTACK_RANGE: f32 = 40.0;
}

/// Broad classification of an item archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Equippable damage source.
    Weapon,
    /// Single-use restorative.
    Potion,
    /// Single-use timed effect.
    Consumable,
    /// Equippable defense source.
    Armor,
}

/// Kind-specific effect carried by an item archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemEffect {
    /// Restores the given amount of health or stamina when consumed.
    Restore {
        /// Points restored on use.
        healing: f32,
    },
    /// Temporarily raises movement speed.
    Haste {
        /// Duration of the speed buff in seconds.
        duration_secs: f32,
    },
    /// Raises defense while equipped.
    Fortify {
        /// Defense points granted.
        defense: f32,
    },
    /// Deals the given damage when equipped as a weapon.
    Arm {
        /// Damage dealt per strike.
        damage: f32,
    },
}

/// Named template from which spawned item instances are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemArchetype {
    /// Restores 30 health.
    HealthPotion,
    /// Restores 50 stamina.
    StaminaPotion,
    /// Grants a 10 second speed buff.
    SpeedBoost,
    /// Grants 5 defense while equipped.
    Shield,
    /// Weapon dealing 15 damage.
    MagicSword,
    /// Starter weapon dealing 10 damage; never spawns on the ground.
    RustySword,
}

impl ItemArchetype {
    /// Archetypes eligible for uniform random ground spawns.
    ///
    /// The rusty sword is deliberately absent: it exists only as the
    /// player's bootstrap weapon.
    pub const SPAWN_CATALOG: [ItemArchetype; 5] = [
        ItemArchetype::HealthPotion,
        ItemArchetype::StaminaPotion,
        ItemArchetype::SpeedBoost,
        ItemArchetype::Shield,
        ItemArchetype::MagicSword,
    ];

    /// Display name of the archetype.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HealthPotion => "Health Potion",
            Self::StaminaPotion => "Stamina Potion",
            Self::SpeedBoost => "Speed Boost",
            Self::Shield => "Shield",
            Self::MagicSword => "Magic Sword",
            Self::RustySword => "Rusty Sword",
        }
    }

    /// Broad classification of the archetype.
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        match self {
            Self::HealthPotion | Self::StaminaPotion => ItemCategory::Potion,
            Self::SpeedBoost => ItemCategory::Consumable,
            Self::Shield => ItemCategory::Armor,
            Self::MagicSword | Self::RustySword => ItemCategory::Weapon,
        }
    }

    /// Kind-specific effect payload of the archetype.
    #[must_use]
    pub const fn effect(&self) -> ItemEffect {
        match self {
            Self::HealthPotion => ItemEffect::Restore { healing: 30.0 },
            Self::StaminaPotion => ItemEffect::Restore { healing: 50.0 },
            Self::SpeedBoost => ItemEffect::Haste {
                duration_secs: 10.0,
            },
            Self::Shield => ItemEffect::Fortify { defense: 5.0 },
            Self::MagicSword => ItemEffect::Arm { damage: 15.0 },
            Self::RustySword => ItemEffect::Arm { damage: 10.0 },
        }
    }

    /// Body color used by presentation layers.
    #[must_use]
    pub const fn color(&self) -> SpriteColor {
        match self {
            Self::HealthPotion => SpriteColor::from_rgb(0xff, 0x52, 0x52),
            Self::StaminaPotion => SpriteColor::from_rgb(0x21, 0x96, 0xf3),
            Self::SpeedBoost => SpriteColor::from_rgb(0xff, 0x98, 0x00),
            Self::Shield => SpriteColor::from_rgb(0x9c, 0x27, 0xb0),
            Self::MagicSword => SpriteColor::from_rgb(0xe9, 0x1e, 0x63),
            Self::RustySword => SpriteColor::from_rgb(0x8d, 0x6e, 0x63),
        }
    }

    /// Display icon used by presentation layers.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::HealthPotion => "\u{1f9ea}",
            Self::StaminaPotion => "\u{1f37a}",
            Self::SpeedBoost => "\u{26a1}",
            Self::Shield => "\u{1f6e1}\u{fe0f}",
            Self::MagicSword => "\u{2694}\u{fe0f}",
            Self::RustySword => "\u{1f5e1}\u{fe0f}",
        }
    }

    /// Short flavor line shown by inventory displays.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::HealthPotion => "Restores 30 HP",
            Self::StaminaPotion => "Restores 50 stamina",
            Self::SpeedBoost => "Increases speed for 10s",
            Self::Shield => "Adds 5 defense",
            Self::MagicSword => "Deals 15 damage",
            Self::RustySword => "An old but trusty sword",
        }
    }
}

/// Stackable inventory entry owned by the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InventoryItem {
    /// Identifier of the entry within the inventory.
    pub id: ItemId,
    /// Archetype the entry was derived from.
    pub archetype: ItemArchetype,
    /// Number of stacked instances.
    pub quantity: u32,
    /// Whether the entry is currently equipped.
    pub equipped: bool,
}

/// A collectible item instance lying on the current floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundItem {
    /// Identifier assigned at spawn time, unique within the floor.
    pub id: ItemId,
    /// Archetype the instance was derived from.
    pub archetype: ItemArchetype,
    /// World-space X coordinate of the item's center.
    pub x: f32,
    /// World-space Y coordinate of the item's center.
    pub y: f32,
    /// Hitbox width in world units.
    pub width: f32,
    /// Hitbox height in world units.
    pub height: f32,
    /// Number of stacked instances granted on pickup.
    pub quantity: u32,
    /// Whether the item has already been collected.
    pub collected: bool,
}

impl GroundItem {
    /// Hitbox edge length shared by every ground item.
    pub const HITBOX: f32 = 20.0;
}

/// The singular, session-long player entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// World-space X coordinate of the player's center.
    pub x: f32,
    /// World-space Y coordinate of the player's center.
    pub y: f32,
    /// Hitbox width in world units.
    pub width: f32,
    /// Hitbox height in world units.
    pub height: f32,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Movement speed in world units per simulation step.
    pub speed: f32,
    /// Base damage dealt by unarmed attacks.
    pub damage: f32,
    /// Damage reduction applied to incoming hits.
    pub defense: f32,
    /// Character level.
    pub level: u32,
    /// Accumulated experience points.
    pub experience: u32,
    /// Carried items, including equipped gear.
    pub inventory: Vec<InventoryItem>,
    /// Inventory entry currently wielded as a weapon, if any.
    pub equipped_weapon: Option<ItemId>,
}

impl Player {
    /// Hitbox edge length of the player.
    pub const HITBOX: f32 = 30.0;

    /// Creates a fresh player with starting stats and an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: Self::HITBOX,
            height: Self::HITBOX,
            health: 100.0,
            max_health: 100.0,
            speed: 3.0,
            damage: 10.0,
            defense: 0.0,
            level: 1,
            experience: 0,
            inventory: Vec::new(),
            equipped_weapon: None,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// The level-completion trigger placed once per floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitPortal {
    /// World-space X coordinate of the portal's center.
    pub x: f32,
    /// World-space Y coordinate of the portal's center.
    pub y: f32,
    /// Width of the portal rectangle, one full tile.
    pub width: f32,
    /// Height of the portal rectangle, one full tile.
    pub height: f32,
}

impl ExitPortal {
    /// Body color used by presentation layers.
    pub const COLOR: SpriteColor = SpriteColor::from_rgb(0x00, 0xbc, 0xd4);

    /// Display icon used by presentation layers.
    pub const ICON: &'static str = "\u{1f6aa}";
}

/// Selectable difficulty settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyId {
    /// Softer enemies dealing reduced damage.
    Easy,
    /// Baseline multipliers.
    Normal,
    /// Beefier enemies dealing increased damage.
    Hard,
    /// Doubled enemy health and heavy damage.
    Expert,
}

impl DifficultyId {
    /// Every selectable difficulty, in ascending order of severity.
    pub const ALL: [DifficultyId; 4] = [
        DifficultyId::Easy,
        DifficultyId::Normal,
        DifficultyId::Hard,
        DifficultyId::Expert,
    ];

    /// Resolves the static descriptor for this difficulty.
    ///
    /// Descriptors are total: every identifier resolves, so callers never
    /// need an "unknown difficulty" path.
    #[must_use]
    pub const fn descriptor(self) -> Difficulty {
        match self {
            Self::Easy => Difficulty {
                id: Self::Easy,
                name: "EASY",
                enemy_multiplier: 0.7,
                damage_multiplier: 0.8,
            },
            Self::Normal => Difficulty {
                id: Self::Normal,
                name: "NORMAL",
                enemy_multiplier: 1.0,
                damage_multiplier: 1.0,
            },
            Self::Hard => Difficulty {
                id: Self::Hard,
                name: "HARD",
                enemy_multiplier: 1.5,
                damage_multiplier: 1.2,
            },
            Self::Expert => Difficulty {
                id: Self::Expert,
                name: "EXPERT",
                enemy_multiplier: 2.0,
                damage_multiplier: 1.5,
            },
        }
    }
}

/// Multiplier set applied to spawned enemy stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    /// Identifier the descriptor belongs to.
    pub id: DifficultyId,
    /// Display name of the difficulty.
    pub name: &'static str,
    /// Multiplier applied to enemy health.
    pub enemy_multiplier: f32,
    /// Multiplier applied to enemy damage.
    pub damage_multiplier: f32,
}

/// Per-floor tuning of spawn counts and stat multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorPlan {
    /// Display name of the floor.
    pub name: &'static str,
    /// Number of enemies to place.
    pub enemy_count: u32,
    /// Multiplier applied to enemy base health.
    pub enemy_health_mult: f32,
    /// Multiplier applied to enemy base damage.
    pub enemy_damage_mult: f32,
    /// Number of ground items to place.
    pub item_count: u32,
}

/// Configured floor plans; floors beyond the last entry reuse it.
pub static FLOOR_PLANS: [FloorPlan; 5] = [
    FloorPlan {
        name: "Floor 1: The Beginning",
        enemy_count: 3,
        enemy_health_mult: 0.8,
        enemy_damage_mult: 0.8,
        item_count: 3,
    },
    FloorPlan {
        name: "Floor 2: Deeper Caves",
        enemy_count: 5,
        enemy_health_mult: 1.0,
        enemy_damage_mult: 1.0,
        item_count: 4,
    },
    FloorPlan {
        name: "Floor 3: Dark Chambers",
        enemy_count: 7,
        enemy_health_mult: 1.2,
        enemy_damage_mult: 1.1,
        item_count: 5,
    },
    FloorPlan {
        name: "Floor 4: Ancient Ruins",
        enemy_count: 9,
        enemy_health_mult: 1.5,
        enemy_damage_mult: 1.3,
        item_count: 6,
    },
    FloorPlan {
        name: "Floor 5: The Abyss",
        enemy_count: 11,
        enemy_health_mult: 1.8,
        enemy_damage_mult: 1.5,
        item_count: 7,
    },
];

/// Resolves the plan for a one-based floor number, clamping floors beyond
/// the configured set to the last entry.
#[must_use]
pub fn floor_plan(floor: u32) -> &'static FloorPlan {
    let index = floor.saturating_sub(1) as usize;
    &FLOOR_PLANS[index.min(FLOOR_PLANS.len() - 1)]
}

/// Symbolic value of a single minimap cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinimapTile {
    /// Traversable floor with nothing on it.
    Empty,
    /// Impassable wall.
    Wall,
    /// The player's cell; wins every tie.
    Player,
    /// A cell occupied by at least one enemy.
    Enemy,
    /// A cell holding an uncollected item.
    Item,
    /// The floor exit.
    Exit,
}

/// Render-ready symbolic projection of the world, recomputed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimapGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<MinimapTile>,
}

impl MinimapGrid {
    /// Creates an empty projection with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            tiles: vec![MinimapTile::Empty; capacity],
        }
    }

    /// Number of columns contained in the projection.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the projection.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Symbolic value of the provided cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<MinimapTile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Overwrites the symbolic value of the provided cell.
    ///
    /// Writes outside the grid bounds are ignored.
    pub fn set(&mut self, cell: CellCoord, tile: MinimapTile) {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
        }
    }

    /// Returns the tiles of a single row, or `None` outside the grid.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[MinimapTile]> {
        if row >= self.rows {
            return None;
        }
        let width = self.columns as usize;
        let start = row as usize * width;
        self.tiles.get(start..start + width)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            Some(cell.row() as usize * self.columns as usize + cell.column() as usize)
        } else {
            None
        }
    }
}

/// Severity attached to fire-and-forget notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Something went right.
    Success,
    /// Degraded but recovered behavior.
    Warning,
    /// Something went wrong.
    Error,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Swaps the grid configuration and rebuilds the current floor.
    ConfigureGrid {
        /// Validated grid dimensions and tile length.
        spec: GridSpec,
    },
    /// Resets the player and starts a fresh session on floor one.
    NewGame {
        /// Difficulty selected for the session.
        difficulty: DifficultyId,
    },
    /// Rebuilds the grid and entity collections for the provided floor.
    ///
    /// The player keeps stats and inventory; only the position changes.
    EnterFloor {
        /// One-based floor number; zero is treated as floor one.
        floor: u32,
    },
    /// Requests that the player move to the provided center position.
    ///
    /// The world resolves wall collisions and stores the slid position.
    MovePlayer {
        /// Attempted world-space X coordinate of the player's center.
        x: f32,
        /// Attempted world-space Y coordinate of the player's center.
        y: f32,
    },
    /// Rescales live enemies to the provided difficulty.
    SetDifficulty {
        /// Difficulty to apply.
        difficulty: DifficultyId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new grid configuration took effect.
    GridConfigured {
        /// Configuration now governing the grid.
        spec: GridSpec,
    },
    /// Announces that a floor was generated and populated.
    FloorEntered {
        /// One-based number of the floor that was entered.
        floor: u32,
    },
    /// Confirms the player's spawn cell for the floor.
    PlayerSpawned {
        /// Cell containing the player's center.
        cell: CellCoord,
    },
    /// Confirms that an enemy was placed into the floor.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        id: EnemyId,
        /// Archetype selected for the enemy.
        archetype: EnemyArchetype,
        /// Cell containing the enemy's center.
        cell: CellCoord,
    },
    /// Confirms that a ground item was placed into the floor.
    ItemSpawned {
        /// Identifier assigned to the item.
        id: ItemId,
        /// Archetype selected for the item.
        archetype: ItemArchetype,
        /// Cell containing the item's center.
        cell: CellCoord,
    },
    /// Confirms that the floor exit was placed.
    ExitSpawned {
        /// Cell containing the exit's center.
        cell: CellCoord,
    },
    /// Reports the resolved outcome of a `MovePlayer` command.
    PlayerMoved {
        /// Resolved world-space X coordinate of the player's center.
        x: f32,
        /// Resolved world-space Y coordinate of the player's center.
        y: f32,
        /// Whether a wall blocked the horizontal component of the move.
        blocked_x: bool,
        /// Whether a wall blocked the vertical component of the move.
        blocked_y: bool,
    },
    /// Confirms that a difficulty was applied to the live enemies.
    DifficultyApplied {
        /// Difficulty that is now in effect.
        difficulty: DifficultyId,
    },
    /// Fire-and-forget notification for the host's notification sink.
    Notified {
        /// Human-readable message text.
        text: String,
        /// Severity attached to the message.
        severity: Severity,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_distance_matches_euclidean_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 5);
        assert!((origin.distance(destination) - 5.0).abs() < f32::EPSILON);
        assert!((destination.distance(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn grid_spec_rejects_degenerate_dimensions() {
        assert_eq!(
            GridSpec::new(4, 20, 64.0),
            Err(GridSpecError::DimensionsTooSmall {
                columns: 4,
                rows: 20
            })
        );
        assert_eq!(
            GridSpec::new(20, 20, 0.0),
            Err(GridSpecError::NonPositiveTileLength { tile_length: 0.0 })
        );
    }

    #[test]
    fn grid_spec_maps_cells_to_world_space_and_back() {
        let spec = GridSpec::default();
        let cell = CellCoord::new(3, 3);
        let (x, y) = spec.cell_center(cell);
        assert_eq!((x, y), (224.0, 224.0));
        assert_eq!(spec.cell_of(x, y), cell);
    }

    #[test]
    fn grid_spec_clamps_out_of_bounds_positions() {
        let spec = GridSpec::default();
        assert_eq!(spec.cell_of(-50.0, -50.0), CellCoord::new(0, 0));
        assert_eq!(spec.cell_of(1e6, 1e6), CellCoord::new(19, 19));
    }

    #[test]
    fn floor_plan_clamps_to_the_last_configured_floor() {
        assert_eq!(floor_plan(1).enemy_count, 3);
        assert_eq!(floor_plan(5).enemy_count, 11);
        assert_eq!(floor_plan(99).enemy_count, 11);
        assert_eq!(floor_plan(0).name, FLOOR_PLANS[0].name);
    }

    #[test]
    fn difficulty_descriptors_match_configured_multipliers() {
        let normal = DifficultyId::Normal.descriptor();
        assert_eq!(normal.enemy_multiplier, 1.0);
        assert_eq!(normal.damage_multiplier, 1.0);

        let expert = DifficultyId::Expert.descriptor();
        assert_eq!(expert.enemy_multiplier, 2.0);
        assert_eq!(expert.damage_multiplier, 1.5);
    }

    #[test]
    fn tile_rect_covers_its_cell() {
        let rect = TileRect::from_cell(CellCoord::new(4, 3), 64.0);
        assert_eq!(rect.x, 256.0);
        assert_eq!(rect.y, 192.0);
        assert_eq!(rect.right(), 320.0);
        assert_eq!(rect.bottom(), 256.0);
        assert_eq!(rect.cell(64.0), CellCoord::new(4, 3));
    }

    #[test]
    fn minimap_grid_reads_and_writes_cells() {
        let mut minimap = MinimapGrid::new(4, 3);
        minimap.set(CellCoord::new(2, 1), MinimapTile::Player);
        assert_eq!(
            minimap.tile(CellCoord::new(2, 1)),
            Some(MinimapTile::Player)
        );
        assert_eq!(minimap.tile(CellCoord::new(0, 0)), Some(MinimapTile::Empty));
        assert_eq!(minimap.tile(CellCoord::new(4, 0)), None);

        minimap.set(CellCoord::new(9, 9), MinimapTile::Wall);
        assert_eq!(minimap.row(1).map(<[MinimapTile]>::len), Some(4));
        assert!(minimap.row(3).is_none());
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 11));
    }

    #[test]
    fn grid_spec_round_trips_through_bincode() {
        let spec = GridSpec::new(12, 9, 48.0).expect("valid spec");
        assert_round_trip(&spec);
    }

    #[test]
    fn difficulty_id_round_trips_through_bincode() {
        assert_round_trip(&DifficultyId::Hard);
    }

    #[test]
    fn minimap_grid_round_trips_through_bincode() {
        let mut minimap = MinimapGrid::new(3, 3);
        minimap.set(CellCoord::new(1, 1), MinimapTile::Exit);
        assert_round_trip(&minimap);
    }
}
