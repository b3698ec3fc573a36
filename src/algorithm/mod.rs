/// Efficient bitset implementation for candidate tile tracking
pub mod bitset;
/// Solve loop with restart-on-contradiction policy
pub mod executor;
/// Neighbour constraints and conflict detection
pub mod propagation;
/// Seeded tile choice and collapse target selection
pub mod selection;
/// Single scan-and-collapse step
pub mod solver;
