// src/model/mod.rs

pub mod csi;
pub mod wave;
