mod fixtures;
mod generation;
