//! # Draw Queue
//!
//! Per-frame list of overlay draws handed to the host renderer.
//!
//! - **DrawQueue**: collects draw commands and sorts them for submission
//! - **DrawCommand**: one buffer, texture and transform
//! - **CommandType**: opaque draws sort front to back, translucent ones back to front

use super::device::BufferId;
use super::primitives::Topology;
use super::scene::EntityKey;
use super::texture::TextureHandle;
use crate::foundation::math::Mat4;

/// Type of draw command for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Rendered front-to-back for depth testing efficiency
    Opaque,
    /// Rendered back-to-front for alpha blending
    Transparent,
}

/// Everything the host needs to draw one overlay mesh
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Entity that owns the mesh
    pub entity: EntityKey,

    /// Vertex buffer to bind
    pub buffer: BufferId,

    /// Vertex layout in `buffer`
    pub topology: Topology,

    /// Number of triangles
    pub primitive_count: usize,

    /// Texture to bind
    pub texture: TextureHandle,

    /// Blend opacity
    pub opacity: f32,

    /// World transform matrix
    pub transform: Mat4,

    /// Type of command for sorting
    pub command_type: CommandType,

    /// Distance from the viewer
    pub depth_key: f32,
}

impl DrawCommand {
    /// Opaque when `opacity` is at least one, transparent otherwise
    pub fn command_type_for(opacity: f32) -> CommandType {
        if opacity >= 1.0 {
            CommandType::Opaque
        } else {
            CommandType::Transparent
        }
    }
}

/// Collection of draw commands organized for submission
#[derive(Debug, Default)]
pub struct DrawQueue {
    /// Opaque draws sorted front-to-back (near to far)
    opaque_commands: Vec<DrawCommand>,

    /// Transparent draws sorted back-to-front (far to near)
    transparent_commands: Vec<DrawCommand>,
}

impl DrawQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a draw command to the queue
    pub fn add_command(&mut self, command: DrawCommand) {
        match command.command_type {
            CommandType::Opaque => self.opaque_commands.push(command),
            CommandType::Transparent => self.transparent_commands.push(command),
        }
    }

    /// Sort commands for rendering
    pub fn sort_commands(&mut self) {
        // Front-to-back for early depth rejection
        self.opaque_commands.sort_by(|a, b| {
            a.depth_key.partial_cmp(&b.depth_key).unwrap_or(std::cmp::Ordering::Equal)
        });

        // Back-to-front for correct alpha blending
        self.transparent_commands.sort_by(|a, b| {
            b.depth_key.partial_cmp(&a.depth_key).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Opaque draws, in submission order once sorted
    pub fn opaque_commands(&self) -> &[DrawCommand] {
        &self.opaque_commands
    }

    /// Transparent draws, in submission order once sorted
    pub fn transparent_commands(&self) -> &[DrawCommand] {
        &self.transparent_commands
    }

    /// Every command: opaque first, then transparent
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.opaque_commands.iter().chain(&self.transparent_commands)
    }

    /// Total number of commands
    pub fn len(&self) -> usize {
        self.opaque_commands.len() + self.transparent_commands.len()
    }

    /// True when the queue holds no commands
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every command, keeping allocations
    pub fn clear(&mut self) {
        self.opaque_commands.clear();
        self.transparent_commands.clear();
    }
}
