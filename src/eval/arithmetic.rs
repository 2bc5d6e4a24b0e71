use super::Control;
use crate::{ExitException, Frame, MemoryValue, Resolved, Tag};

/// Both inputs must carry `tag`. The result keeps the tag, except for
/// comparisons which produce `UINT1`.
pub fn binary(
	frame: &mut Frame,
	tag: Tag,
	resolved: &Resolved,
	op: fn(&MemoryValue, &MemoryValue) -> Result<MemoryValue, ExitException>,
) -> Control {
	let (a, b, dst) = (resolved[0], resolved[1], resolved[2]);
	try_or_fail!(frame.memory.check_tags(tag, &[a, b]));
	let lhs = frame.memory.get(a);
	let rhs = frame.memory.get(b);
	let value = try_or_fail!(op(&lhs, &rhs));
	frame.memory.set(dst, value);
	Control::Continue
}

pub fn not(frame: &mut Frame, tag: Tag, resolved: &Resolved) -> Control {
	let (src, dst) = (resolved[0], resolved[1]);
	let value = try_or_fail!(frame.memory.get_tagged(src, tag));
	frame.memory.set(dst, try_or_fail!(value.not()));
	Control::Continue
}

/// Any source tag is accepted.
pub fn cast(frame: &mut Frame, dst_tag: Tag, resolved: &Resolved) -> Control {
	let (src, dst) = (resolved[0], resolved[1]);
	let value = frame.memory.get(src);
	frame.memory.set(dst, value.cast(dst_tag));
	Control::Continue
}
