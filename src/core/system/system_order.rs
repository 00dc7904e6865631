//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Input (button presses, slider drags, keyboard)
//! 2. Flow (state transitions, spawning reactions to input events)
//! 3. Presentation (text binding, colors, visibility, animation)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet; // translate raw interaction into events / resource edits

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FlowSet; // consume input events

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet; // reflect resources into UI nodes
