use crate::eval::{eval, CallRequest, Control};
use crate::gasometer::{Gas, Gasometer};
use crate::{
	Config, ExecutionEnvironment, ExitError, ExitException, ExitResult, FieldElement, Instruction,
	Memory, RevertReason, WorldState,
};
use alloc::{rc::Rc, vec::Vec};

#[cfg(feature = "tracing")]
use crate::tracing::Event;

/// Capture represents the result of execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Capture<E, T> {
	/// The machine has exited. It cannot be executed again.
	Exit(E),
	/// The machine has trapped. It is waiting for external information, and
	/// can be executed again.
	Trap(T),
}

/// One call frame: a decoded program with its own memory, gas and
/// environment.
pub struct Frame<'config> {
	pub(crate) instructions: Rc<Vec<Instruction>>,
	/// Program counter, or the exit result once halted.
	position: Result<usize, ExitResult>,
	pub(crate) memory: Memory,
	pub(crate) gasometer: Gasometer<'config>,
	pub(crate) environment: ExecutionEnvironment,
	/// Return pcs of `INTERNALCALL`.
	pub(crate) internal_call_stack: Vec<usize>,
	/// Output of the last nested call.
	pub(crate) returndata: Vec<FieldElement>,
	/// Whether the last nested call succeeded.
	pub(crate) success: bool,
	/// Output of `RETURN` or `REVERT`.
	pub(crate) output: Vec<FieldElement>,
	/// Reason of the last failed nested call.
	pub(crate) last_failure: Option<RevertReason>,
	/// Set between `finish_call` and the next instruction that completes.
	after_call: bool,
	revert_reason: Option<RevertReason>,
}

impl<'config> Frame<'config> {
	pub fn new(
		instructions: Rc<Vec<Instruction>>,
		environment: ExecutionEnvironment,
		gas_limit: Gas,
		config: &'config Config,
	) -> Self {
		Self {
			instructions,
			position: Ok(0),
			memory: Memory::new(),
			gasometer: Gasometer::new(gas_limit, &config.gasometer),
			environment,
			internal_call_stack: Vec::new(),
			returndata: Vec::new(),
			success: false,
			output: Vec::new(),
			last_failure: None,
			after_call: false,
			revert_reason: None,
		}
	}

	pub fn memory(&self) -> &Memory {
		&self.memory
	}

	pub fn memory_mut(&mut self) -> &mut Memory {
		&mut self.memory
	}

	pub fn environment(&self) -> &ExecutionEnvironment {
		&self.environment
	}

	pub fn gasometer(&self) -> &Gasometer<'config> {
		&self.gasometer
	}

	pub fn gas_left(&self) -> Gas {
		self.gasometer.gas_left()
	}

	/// Current program counter, `None` once halted.
	pub fn pc(&self) -> Option<usize> {
		self.position.as_ref().ok().copied()
	}

	/// Exit result, `None` while running.
	pub fn exit_result(&self) -> Option<&ExitResult> {
		self.position.as_ref().err()
	}

	pub fn output(&self) -> &[FieldElement] {
		&self.output
	}

	pub fn revert_reason(&self) -> Option<&RevertReason> {
		self.revert_reason.as_ref()
	}

	pub(crate) fn into_parts(self) -> (Vec<FieldElement>, Gas, Option<RevertReason>) {
		let gas_left = self.gasometer.gas_left();
		(self.output, gas_left, self.revert_reason)
	}

	/// Halt the frame. A failure records its reason, blaming the
	/// instruction at `pc` when there is one. The last failed nested call is
	/// part of the reason of an explicit revert, or of an exception raised
	/// before any instruction completed after that call.
	pub(crate) fn exit(&mut self, result: ExitResult, pc: Option<usize>) {
		if let Err(error) = &result {
			let mut reason = RevertReason::new(
				error.clone(),
				self.environment.address,
				self.environment.depth,
			);
			if let Some(pc) = pc {
				if let Some(instruction) = self.instructions.get(pc) {
					reason = reason.at(pc, instruction);
				}
			}
			match error {
				ExitError::Reverted => reason.data = self.output.clone(),
				// Exceptional halts consume all remaining gas.
				ExitError::Exception(_) => {
					self.gasometer.fail();
				}
				ExitError::Decode(_) => (),
			}
			let failure = self.last_failure.take();
			if self.after_call || matches!(error, ExitError::Reverted) {
				reason.nested = failure.map(alloc::boxed::Box::new);
			}
			self.revert_reason = Some(reason);
		}
		self.position = Err(result);
	}

	/// Resume after a nested call finished: record its outcome, take back
	/// the gas it did not use and move past the call instruction.
	pub(crate) fn finish_call(
		&mut self,
		success: bool,
		output: Vec<FieldElement>,
		refund: Gas,
		failure: Option<RevertReason>,
	) {
		self.success = success;
		self.returndata = output;
		self.last_failure = failure;
		self.after_call = true;
		if let Err(e) = self.gasometer.record_refund(refund) {
			let pc = self.pc();
			self.exit(Err(e.into()), pc);
			return;
		}
		if let Ok(pc) = self.position {
			self.position = Ok(pc + 1);
		}
	}

	/// Run until the frame halts or requests a nested call.
	pub fn run<H: WorldState>(&mut self, host: &mut H) -> Capture<ExitResult, CallRequest> {
		loop {
			if let Err(capture) = self.step(host) {
				return capture;
			}
		}
	}

	/// Execute one instruction.
	pub fn step<H: WorldState>(&mut self, host: &mut H) -> Result<(), Capture<ExitResult, CallRequest>> {
		let pc = self
			.position
			.as_ref()
			.map(|pc| *pc)
			.map_err(|result| Capture::Exit(result.clone()))?;

		let instructions = self.instructions.clone();
		let instruction = match instructions.get(pc) {
			Some(instruction) => instruction,
			None => {
				self.exit(ExitException::PcOutOfRange(pc).into(), None);
				return Err(Capture::Exit(ExitException::PcOutOfRange(pc).into()));
			}
		};
		let opcode = instruction.opcode();

		#[cfg(feature = "tracing")]
		Event::Step {
			address: self.environment.address,
			depth: self.environment.depth,
			pc,
			opcode,
		}
		.emit();
		log::trace!(target: "avm", "Running opcode: {}, Pre gas-left: {}", opcode, self.gas_left());

		let mode = instruction.addressing_mode();
		let words = instruction.offset_words();
		let resolved = match mode.resolve(&words, &self.memory).and_then(|resolved| {
			self.gasometer
				.record_base(
					opcode,
					mode.indirect_count(words.len()),
					mode.relative_count(words.len()),
				)
				.map(|()| resolved)
		}) {
			Ok(resolved) => resolved,
			Err(e) => {
				let result: ExitResult = Err(e.into());
				self.exit(result.clone(), Some(pc));
				return Err(Capture::Exit(result));
			}
		};

		match eval(self, instruction, pc, &resolved, host) {
			Control::Continue => {
				self.position = Ok(pc + 1);
				self.after_call = false;
				Ok(())
			}
			Control::Jump(target) => {
				if (target as usize) < instructions.len() {
					self.position = Ok(target as usize);
					self.after_call = false;
					Ok(())
				} else {
					let result: ExitResult = ExitException::InvalidJump(target).into();
					self.exit(result.clone(), Some(pc));
					Err(Capture::Exit(result))
				}
			}
			Control::Exit(result) => {
				self.exit(result.clone(), Some(pc));
				Err(Capture::Exit(result))
			}
			Control::Call(request) => Err(Capture::Trap(request)),
		}
	}
}
