// entities.rs - Plain data for everything that lives in the play field.
// The session owns these; the Bevy layer only mirrors them as sprites.

use bevy::math::Vec2;

/// Identity of a live body. Ids are never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Spaceship,
    Asteroid,
    Projectile,
    PowerUp,
    BackgroundDecoration,
}

/// Collision class bit-flags.
///
/// A newtype over u32 instead of raw constants, so a category can't be
/// confused with any other integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const SPACESHIP: Category = Category(0b1);
    pub const ASTEROID: Category = Category(0b10);
    pub const PROJECTILE: Category = Category(0b100);
    pub const POWER_UP: Category = Category(0b1000);

    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: Category) -> Category {
        Category(self.0 | other.0)
    }
}

impl EntityKind {
    /// The category a body of this kind normally carries.
    pub fn category(self) -> Category {
        match self {
            EntityKind::Spaceship => Category::SPACESHIP,
            EntityKind::Asteroid => Category::ASTEROID,
            EntityKind::Projectile => Category::PROJECTILE,
            EntityKind::PowerUp => Category::POWER_UP,
            EntityKind::BackgroundDecoration => Category::NONE,
        }
    }

    /// Which categories this kind wants to hear about on contact.
    pub fn contact_mask(self) -> Category {
        match self {
            EntityKind::Spaceship => Category::ASTEROID.union(Category::POWER_UP),
            EntityKind::Asteroid => Category::SPACESHIP.union(Category::PROJECTILE),
            EntityKind::Projectile => Category::ASTEROID,
            EntityKind::PowerUp => Category::SPACESHIP,
            EntityKind::BackgroundDecoration => Category::NONE,
        }
    }

    /// Bodies that stop moving when the game is over. Power-ups and
    /// decorations keep drifting.
    pub fn freezes_on_game_over(self) -> bool {
        matches!(
            self,
            EntityKind::Spaceship | EntityKind::Asteroid | EntityKind::Projectile
        )
    }
}

/// A body in the play field. Positions use a bottom-left origin with y up.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub scale: f32,
    /// Collision and culling radius, already multiplied by `scale`.
    pub radius: f32,
    /// Asteroid mass is proportional to its scale; other kinds use 1.0.
    pub mass: f32,
    /// Ship heading in radians, 0 pointing up.
    pub rotation: f32,
    /// Which decoration image to draw. Unused by other kinds.
    pub image: usize,
}

impl Body {
    pub fn new(kind: EntityKind, position: Vec2, radius: f32) -> Self {
        Body {
            id: EntityId(0),
            kind,
            position,
            velocity: Vec2::ZERO,
            scale: 1.0,
            radius,
            mass: 1.0,
            rotation: 0.0,
            image: 0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.radius *= scale;
        self.scale = scale;
        self
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance_squared(other.position)
            < (self.radius + other.radius) * (self.radius + other.radius)
    }
}

/// Size of the play field in session units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True once a body has fully left the field. A body that is still
    /// entering from above (sitting just over the top edge) is not culled.
    pub fn has_left(&self, body: &Body) -> bool {
        let p = body.position;
        let r = body.radius;
        p.y + r < 0.0 || p.x + r < 0.0 || p.x - r > self.width || p.y - r > self.height + r
    }

    pub fn clamp_inset(&self, point: Vec2, inset: f32) -> Vec2 {
        let inset_x = inset.min(self.width / 2.0);
        let inset_y = inset.min(self.height / 2.0);
        Vec2::new(
            point.x.clamp(inset_x, self.width - inset_x),
            point.y.clamp(inset_y, self.height - inset_y),
        )
    }
}
