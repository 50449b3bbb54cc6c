//! Renderer interface.
//!
//! The core never draws. Once per frame, after every simulation system has
//! run, [`draw_list`] reads the world and produces [`DrawCommand`]s in screen
//! coordinates for an external [`Renderer`] to present. Nothing here mutates
//! simulation state.

use sim_component::{
    Collision, ComponentKind, EntityId, Position, QueryDescriptor, Render, Rotation,
};
use sim_math::{DVec2, dvec2};
use sim_world::World;

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// The drawable surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a simulation point to this viewport; see [`cartesian_to_screen`].
    #[must_use]
    pub fn to_screen(&self, x: f64, y: f64) -> DVec2 {
        cartesian_to_screen(x, y, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(480.0, 480.0)
    }
}

/// Convert y-up simulation coordinates to y-down screen coordinates for a
/// surface `height` pixels tall.
#[must_use]
pub fn cartesian_to_screen(x: f64, y: f64, height: f64) -> DVec2 {
    dvec2(x, height - y)
}

/// One primitive for the renderer, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An image at the entity's position, rotated by `angle` radians when
    /// the entity has a rotation and a pivot.
    Sprite {
        entity: EntityId,
        path: String,
        at: DVec2,
        size: Option<(u32, u32)>,
        center: Option<(f64, f64)>,
        angle: Option<f64>,
    },
    /// A debug dot at the entity's position.
    Marker { entity: EntityId, at: DVec2 },
    /// The entity's collision box outline.
    DebugBox {
        entity: EntityId,
        top_left: DVec2,
        bottom_right: DVec2,
    },
}

/// Build this frame's draw commands.
///
/// Entities are visited by ascending render priority, ties broken by ID.
/// Per entity, the sprite comes first, then the position marker, then the
/// box; hidden entities produce nothing.
#[must_use]
pub fn draw_list(world: &World, viewport: Viewport) -> Vec<DrawCommand> {
    let mut entities: Vec<(i32, EntityId, &Render)> = world
        .entities_with(ComponentKind::Render)
        .into_iter()
        .filter_map(|entity| {
            let render = world.get::<Render>(entity)?;
            Some((render.priority, entity, render))
        })
        .collect();
    entities.sort_by_key(|&(priority, entity, _)| (priority, entity));

    let mut commands = Vec::new();
    for (_, entity, render) in entities {
        if !render.renderable {
            continue;
        }
        let position = world.get::<Position>(entity);

        if let (Some(position), Some(path)) = (position, &render.sprite) {
            let angle = world
                .get::<Rotation>(entity)
                .filter(|_| render.center.is_some())
                .map(|rotation| rotation.angle);
            commands.push(DrawCommand::Sprite {
                entity,
                path: path.clone(),
                at: viewport.to_screen(position.x, position.y),
                size: render.size,
                center: render.center,
                angle,
            });
        }

        if !render.debug {
            continue;
        }
        if let Some(position) = position {
            commands.push(DrawCommand::Marker {
                entity,
                at: viewport.to_screen(position.x, position.y),
            });
        }
        if let Some(collision) = world.get::<Collision>(entity) {
            let aabb = collision.aabb;
            commands.push(DrawCommand::DebugBox {
                entity,
                top_left: viewport.to_screen(aabb.x1, aabb.y1),
                bottom_right: viewport.to_screen(aabb.x2, aabb.y2),
            });
        }
    }
    commands
}

/// Consumes a frame's draw commands.
pub trait Renderer {
    fn present(&mut self, commands: &[DrawCommand]);
}

/// Hands [`draw_list`] to a renderer once per update.
#[derive(Debug)]
pub struct RenderSystem<R> {
    renderer: R,
    viewport: Viewport,
    query: QueryDescriptor,
}

impl<R: Renderer> RenderSystem<R> {
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self {
            renderer,
            viewport,
            query: QueryDescriptor::new().require(ComponentKind::Render),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Give back the renderer.
    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> System for RenderSystem<R> {
    fn name(&self) -> &str {
        "render"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, _frame: &FrameArgs) -> Result<(), SystemError> {
        let commands = draw_list(world, self.viewport);
        self.renderer.present(&commands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sim_component::CollisionType;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<DrawCommand>>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, commands: &[DrawCommand]) {
            self.frames.push(commands.to_vec());
        }
    }

    #[test]
    fn test_cartesian_to_screen_flips_y() {
        assert_eq!(cartesian_to_screen(10.0, 30.0, 480.0), dvec2(10.0, 450.0));
        assert_eq!(Viewport::new(100.0, 50.0).to_screen(0.0, 0.0), dvec2(0.0, 50.0));
    }

    #[test]
    fn test_draw_order_follows_priority() {
        let mut world = World::new();
        let front = world
            .create([
                Position::new(1.0, 1.0).into(),
                Render::debug().with_priority(5).into(),
            ])
            .unwrap();
        let back = world
            .create([
                Position::new(2.0, 2.0).into(),
                Render::debug().with_priority(-1).into(),
            ])
            .unwrap();

        let commands = draw_list(&world, Viewport::new(10.0, 10.0));
        assert_eq!(
            commands,
            vec![
                DrawCommand::Marker {
                    entity: back,
                    at: dvec2(2.0, 8.0)
                },
                DrawCommand::Marker {
                    entity: front,
                    at: dvec2(1.0, 9.0)
                },
            ]
        );
    }

    #[test]
    fn test_sprite_marker_and_box() {
        let mut world = World::new();
        let arrow = world
            .create([
                Position::new(5.0, 5.0).into(),
                Collision::new(4.0, 6.0, 6.0, 4.0, CollisionType::Stick)
                    .unwrap()
                    .into(),
                Rotation::default().into(),
                Render {
                    center: Some((1.0, 1.0)),
                    ..Render::sprite("arrow.png")
                }
                .into(),
            ])
            .unwrap();

        let commands = draw_list(&world, Viewport::new(20.0, 20.0));
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            &commands[0],
            DrawCommand::Sprite { entity, angle: Some(_), .. } if *entity == arrow
        ));
        assert_eq!(
            commands[2],
            DrawCommand::DebugBox {
                entity: arrow,
                top_left: dvec2(4.0, 14.0),
                bottom_right: dvec2(6.0, 16.0),
            }
        );
    }

    #[test]
    fn test_hidden_and_non_debug_entities() {
        let mut world = World::new();
        world
            .create([
                Position::default().into(),
                Render {
                    renderable: false,
                    ..Render::debug()
                }
                .into(),
            ])
            .unwrap();
        world
            .create([
                Position::default().into(),
                Render {
                    debug: false,
                    ..Render::debug()
                }
                .into(),
            ])
            .unwrap();

        assert!(draw_list(&world, Viewport::default()).is_empty());
    }

    #[test]
    fn test_render_system_presents_each_update() {
        let mut world = World::new();
        world
            .create([Position::default().into(), Render::debug().into()])
            .unwrap();
        let mut render = RenderSystem::new(Recorder::default(), Viewport::default());
        let frame = FrameArgs::new(0.0, 1.0 / 60.0);

        render.update(&mut world, &frame).unwrap();
        render.update(&mut world, &frame).unwrap();

        let recorder = render.into_renderer();
        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(recorder.frames[0].len(), 1);
    }
}
