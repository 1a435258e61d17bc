//! Frontier Realms - turn-based strategy simulation core

pub mod city;
pub mod core;
pub mod diplomacy;
pub mod map;
pub mod simulation;
pub mod unit;
