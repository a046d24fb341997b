//! Projectile collision resolution.
//!
//! Contacts are gathered from both sides of every overlap, so the same
//! pair can be delivered more than once per tick. `resolve` is a pure
//! function of the projectile's latch and one contact; the system applies
//! whatever effect it returns.

use hecs::Entity;

use onslaught_core::components::{Collider, Enemy, Player, Projectile};
use onslaught_core::enums::{Faction, PenetrationClass};
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::CollisionLayers;
use onslaught_core::types::{ActorId, Position};

use crate::context::{actor_id, is_alive, CombatContext};
use crate::systems::damage;

/// Projectile properties the resolver needs.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileTraits {
    pub class: PenetrationClass,
    pub phases_walls: bool,
    /// Inside the post-spawn grace window.
    pub in_grace: bool,
}

/// One contact as seen from a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Another projectile. `opposing` when the factions differ and both sides cancel fire.
    Projectile { opposing: bool },
    /// A living actor. `hostile` when it belongs to the other faction.
    Actor { hostile: bool, already_hit: bool },
    /// Solid static geometry.
    Obstacle,
}

/// Effect of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Non-terminal; keep flying.
    Ignore,
    /// Destroy both projectiles, no damage.
    Cancel,
    /// Damage the actor; `destroy` ends the projectile.
    Damage { destroy: bool },
    /// Area detonation at the projectile's position.
    Detonate,
    /// Destroy without effect.
    Destroy,
}

/// Resolve one contact. Returns the new latch value and the effect.
pub fn resolve(resolved: bool, traits: ProjectileTraits, contact: Contact) -> (bool, Resolution) {
    if resolved {
        return (true, Resolution::Ignore);
    }
    match contact {
        Contact::Projectile { opposing: true } => (true, Resolution::Cancel),
        Contact::Projectile { opposing: false } => (false, Resolution::Ignore),
        Contact::Actor { hostile: false, .. } => (false, Resolution::Ignore),
        Contact::Actor { hostile: true, already_hit } => match traits.class {
            PenetrationClass::SingleTarget => (true, Resolution::Damage { destroy: true }),
            PenetrationClass::Piercing if already_hit => (false, Resolution::Ignore),
            PenetrationClass::Piercing => (false, Resolution::Damage { destroy: false }),
            PenetrationClass::Area => (true, Resolution::Detonate),
        },
        Contact::Obstacle if traits.phases_walls || traits.in_grace => (false, Resolution::Ignore),
        Contact::Obstacle => (true, Resolution::Destroy),
    }
}

#[derive(Clone, Copy)]
enum ContactTarget {
    Projectile(Entity),
    Actor(Entity),
    Obstacle,
}

impl ContactTarget {
    /// Resolution order: cancellation, then targets, then geometry.
    fn priority(self) -> u8 {
        match self {
            ContactTarget::Projectile(_) => 0,
            ContactTarget::Actor(_) => 1,
            ContactTarget::Obstacle => 2,
        }
    }
}

/// Gather every projectile contact this tick and resolve them by priority.
///
/// All projectile pairs settle before any projectile touches an actor or a
/// wall, so cancellation never depends on entity iteration order.
pub fn run(ctx: &mut CombatContext) {
    let contacts = gather_contacts(ctx);
    for (projectile, target) in contacts {
        if !ctx.running() {
            return;
        }
        process_contact(ctx, projectile, target);
    }
}

fn gather_contacts(ctx: &CombatContext) -> Vec<(Entity, ContactTarget)> {
    let projectiles: Vec<(Entity, Position, f64, ActorId)> = {
        let mut query = ctx.world.query::<(&Position, &Collider, &Projectile)>();
        query
            .iter()
            .filter(|(_, (_, _, p))| !p.resolved)
            .map(|(e, (pos, col, p))| (e, *pos, col.radius, p.owner))
            .collect()
    };

    let mut contacts = Vec::new();
    for &(entity, pos, radius, owner) in &projectiles {
        let nearby = ctx.spatial.overlap_circle(
            ctx.world,
            pos,
            radius,
            CollisionLayers::PROJECTILE | CollisionLayers::ACTORS,
        );
        for other in nearby {
            if other == entity || actor_id(other) == owner {
                continue;
            }
            if ctx.world.get::<&Projectile>(other).is_ok() {
                contacts.push((entity, ContactTarget::Projectile(other)));
            } else {
                contacts.push((entity, ContactTarget::Actor(other)));
            }
        }
        if ctx.spatial.overlaps_obstacle(pos, radius, CollisionLayers::WALL) || !ctx.spatial.in_bounds(&pos) {
            contacts.push((entity, ContactTarget::Obstacle));
        }
    }
    contacts.sort_by_key(|&(_, target)| target.priority());
    contacts
}

fn faction_of(ctx: &CombatContext, actor: Entity) -> Option<Faction> {
    if ctx.world.get::<&Player>(actor).is_ok() {
        Some(Faction::Friendly)
    } else if ctx.world.get::<&Enemy>(actor).is_ok() {
        Some(Faction::Hostile)
    } else {
        None
    }
}

fn process_contact(ctx: &mut CombatContext, entity: Entity, target: ContactTarget) {
    let Ok(projectile) = ctx.world.get::<&Projectile>(entity).map(|p| (*p).clone()) else {
        return;
    };
    let traits = ProjectileTraits {
        class: projectile.class,
        phases_walls: projectile.phases_walls,
        in_grace: projectile.age < onslaught_core::constants::PROJECTILE_GRACE_SECS,
    };

    let contact = match target {
        ContactTarget::Projectile(other) => {
            let Ok((faction, other_resolved, other_cancels)) = ctx
                .world
                .get::<&Projectile>(other)
                .map(|p| (p.faction, p.resolved, p.cancels_hostile_fire))
            else {
                return;
            };
            let opposing = !other_resolved
                && faction != projectile.faction
                && projectile.cancels_hostile_fire
                && other_cancels;
            Contact::Projectile { opposing }
        }
        ContactTarget::Actor(actor) => {
            if !is_alive(ctx.world, actor) {
                return;
            }
            let Some(faction) = faction_of(ctx, actor) else {
                return;
            };
            Contact::Actor {
                hostile: faction != projectile.faction,
                already_hit: projectile.hit_set.contains(&actor_id(actor)),
            }
        }
        ContactTarget::Obstacle => Contact::Obstacle,
    };

    let (latch, resolution) = resolve(projectile.resolved, traits, contact);
    if let Ok(mut p) = ctx.world.get::<&mut Projectile>(entity) {
        p.resolved = latch;
    }

    match (resolution, target) {
        (Resolution::Ignore, _) => {}
        (Resolution::Cancel, ContactTarget::Projectile(other)) => {
            if let Ok(mut p) = ctx.world.get::<&mut Projectile>(other) {
                p.resolved = true;
            }
            ctx.despawn.push(entity);
            ctx.despawn.push(other);
        }
        (Resolution::Damage { destroy }, ContactTarget::Actor(actor)) => {
            if projectile.class == PenetrationClass::Piercing {
                if let Ok(mut p) = ctx.world.get::<&mut Projectile>(entity) {
                    p.hit_set.push(actor_id(actor));
                }
            }
            damage::apply_damage(ctx, actor, projectile.damage, projectile.channel);
            if destroy {
                ctx.despawn.push(entity);
            }
        }
        (Resolution::Detonate, _) => {
            detonate(ctx, entity, &projectile);
            ctx.despawn.push(entity);
        }
        (Resolution::Destroy, _) => ctx.despawn.push(entity),
        _ => {}
    }
}

/// Area-class payload: damage every opposing actor within the blast radius.
fn detonate(ctx: &mut CombatContext, entity: Entity, projectile: &Projectile) {
    let Ok(center) = ctx.world.get::<&Position>(entity).map(|p| *p) else {
        return;
    };
    ctx.events.push(CombatEvent::Explosion {
        source: projectile.owner,
        position: center,
        radius: projectile.explosion_radius,
    });
    let mask = match projectile.faction {
        Faction::Friendly => CollisionLayers::ENEMY,
        Faction::Hostile => CollisionLayers::PLAYER,
    };
    let victims = ctx
        .spatial
        .overlap_circle(ctx.world, center, projectile.explosion_radius, mask);
    for victim in victims {
        damage::apply_damage(ctx, victim, projectile.damage, projectile.channel);
    }
}
