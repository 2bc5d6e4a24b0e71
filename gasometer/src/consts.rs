pub const G_ZERO: u32 = 0;
pub const G_LOW: u32 = 9;
pub const G_ALU: u32 = 27;
pub const G_COPY: u32 = 27;
pub const G_COPY_PER_ELEMENT: u32 = 3;
pub const G_OUTPUT_PER_ELEMENT: u32 = 3;
pub const G_NULLIFIER_EXISTS: u32 = 924;

pub const G_SLOAD: u32 = 129;
pub const G_SSTORE: u32 = 1657;
pub const G_SSTORE_DA: u32 = 1024;
pub const G_EMIT_NULLIFIER: u32 = 1000;
pub const G_EMIT_NULLIFIER_DA: u32 = 512;
pub const G_CALL: u32 = 3000;
pub const G_CALL_PER_ARG: u32 = 3;
pub const G_MSM: u32 = 1000;
pub const G_MSM_PER_POINT: u32 = 2000;

pub const G_INDIRECT: u32 = 3;
pub const G_RELATIVE: u32 = 3;
