mod simulation;
mod simulation_input;
mod simulation_result;

pub use simulation::{NewSimulation, Simulation, SimulationSummary};
pub use simulation_input::{DataDrivenInputs, SimulationInput};
pub use simulation_result::{ExpectedYield, SimulationResult};
