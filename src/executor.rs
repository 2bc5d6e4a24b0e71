//! Call-stack executor.

use crate::eval::CallRequest;
use crate::gasometer::Gas;
use crate::{
	decode, Capture, Config, ExecutionEnvironment, ExitError, ExitException, ExitResult,
	FieldElement, Frame, Host, Instruction, RevertReason,
};
use alloc::{rc::Rc, vec::Vec};

#[cfg(feature = "tracing")]
use crate::tracing::Event;

/// Outcome of a top-level execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionResult {
	pub reverted: bool,
	pub output: Vec<FieldElement>,
	pub gas_left: Gas,
	pub revert_reason: Option<RevertReason>,
}

impl ExecutionResult {
	fn failed(reason: RevertReason, gas_left: Gas) -> Self {
		Self {
			reverted: true,
			output: Vec::new(),
			gas_left,
			revert_reason: Some(reason),
		}
	}
}

/// Runs a frame and all the frames it calls, keeping suspended callers on an
/// explicit stack.
pub struct Executor<'config, H> {
	host: H,
	config: &'config Config,
}

impl<'config, H: Host> Executor<'config, H> {
	pub fn new(host: H, config: &'config Config) -> Self {
		Self { host, config }
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn into_host(self) -> H {
		self.host
	}

	pub fn config(&self) -> &'config Config {
		self.config
	}

	/// Execute the contract deployed at the environment's address.
	pub fn execute(&mut self, environment: ExecutionEnvironment, gas_limit: Gas) -> ExecutionResult {
		match self.host.load_bytecode(environment.address) {
			Ok(bytecode) => self.execute_bytecode(&bytecode, environment, gas_limit),
			Err(e) => ExecutionResult::failed(
				RevertReason::new(
					ExitException::Host(e).into(),
					environment.address,
					environment.depth,
				),
				gas_limit,
			),
		}
	}

	/// Execute the given bytecode. World state writes of a reverted
	/// execution are discarded.
	pub fn execute_bytecode(
		&mut self,
		bytecode: &[u8],
		environment: ExecutionEnvironment,
		gas_limit: Gas,
	) -> ExecutionResult {
		let instructions = match decode(bytecode, &self.config.instruction_set) {
			Ok(instructions) => instructions,
			Err(e) => {
				log::debug!(target: "avm", "Decoding failed for {}: {}", environment.address, e);
				return ExecutionResult::failed(
					RevertReason::new(e.into(), environment.address, environment.depth),
					gas_limit,
				);
			}
		};

		let frame = Frame::new(Rc::new(instructions), environment, gas_limit, self.config);
		let (result, frame) = self.run(frame);
		let (output, gas_left, revert_reason) = frame.into_parts();
		let reverted = result.is_err();

		ExecutionResult {
			reverted,
			output,
			gas_left,
			revert_reason,
		}
	}

	/// Drive `root` to completion inside its own world state substate.
	/// Returns the root frame after it halted.
	pub fn run(&mut self, root: Frame<'config>) -> (ExitResult, Frame<'config>) {
		let mut stack: Vec<Frame<'config>> = Vec::new();
		let mut current = root;
		self.host.enter();

		#[cfg(feature = "tracing")]
		Event::Enter {
			address: current.environment.address,
			depth: current.environment.depth,
			is_static: current.environment.is_static,
		}
		.emit();

		loop {
			match current.run(&mut self.host) {
				Capture::Trap(request) => match self.enter(&current, request) {
					Ok(callee) => {
						stack.push(current);
						current = callee;
					}
					Err((reason, refund)) => {
						current.finish_call(false, Vec::new(), refund, Some(reason));
					}
				},
				Capture::Exit(result) => {
					let result = self.exit(&mut current, result);
					match stack.pop() {
						Some(mut caller) => {
							let success = result.is_ok();
							let (output, gas_left, revert_reason) = current.into_parts();
							caller.finish_call(success, output, gas_left, revert_reason);
							current = caller;
						}
						None => return (result, current),
					}
				}
			}
		}
	}

	/// Build the callee frame of a nested call. On failure returns the
	/// reason and the gas to give back to the caller.
	fn enter(
		&mut self,
		caller: &Frame<'config>,
		request: CallRequest,
	) -> Result<Frame<'config>, (RevertReason, Gas)> {
		let environment = caller
			.environment
			.nested(request.address, request.calldata, request.is_static);
		let fail = |error: ExitError| {
			log::debug!(target: "avm", "Call to {} failed before execution: {}", request.address, error);
			(
				RevertReason::new(error, request.address, caller.environment.depth + 1),
				request.gas,
			)
		};

		if environment.depth > self.config.call_depth_limit {
			return Err(fail(ExitException::CallTooDeep.into()));
		}
		let bytecode = self
			.host
			.load_bytecode(request.address)
			.map_err(|e| fail(ExitException::Host(e).into()))?;
		let instructions: Vec<Instruction> =
			decode(&bytecode, &self.config.instruction_set).map_err(|e| fail(e.into()))?;

		log::debug!(
			target: "avm",
			"Call execution using address {} at depth {}, gas {}",
			request.address,
			environment.depth,
			request.gas
		);
		#[cfg(feature = "tracing")]
		Event::Enter {
			address: environment.address,
			depth: environment.depth,
			is_static: environment.is_static,
		}
		.emit();

		self.host.enter();
		Ok(Frame::new(Rc::new(instructions), environment, request.gas, self.config))
	}

	/// Close the world state substate of a halted frame.
	fn exit(&mut self, frame: &mut Frame<'config>, result: ExitResult) -> ExitResult {
		let closed = if result.is_ok() {
			self.host.exit_commit()
		} else {
			self.host.exit_revert()
		};
		let result = match closed {
			Ok(()) => result,
			Err(e) => {
				let result: ExitResult = ExitException::Host(e).into();
				frame.exit(result.clone(), None);
				result
			}
		};

		log::debug!(
			target: "avm",
			"Frame {} at depth {} halted: {:?}",
			frame.environment.address,
			frame.environment.depth,
			result
		);
		#[cfg(feature = "tracing")]
		Event::Exit {
			address: frame.environment.address,
			depth: frame.environment.depth,
			success: result.is_ok(),
		}
		.emit();

		result
	}
}
