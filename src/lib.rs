use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod movegen;
pub mod rules;
pub mod selftest;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
