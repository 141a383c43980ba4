mod mock_parameter_store;

pub use mock_parameter_store::MockParameterStore;
