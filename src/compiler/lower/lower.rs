use log::{debug, warn};

use crate::compiler::isa::{Instruction, Mnemonic, Opcode, SourceInstruction};
use crate::compiler::memory::{
    Address, Reg, ResidencyTable, MAX_REGISTERS, MIN_REGISTERS, RESERVED_REGISTER,
    SCRATCH_REGISTER,
};

use super::builder::ProgramBuilder;
use super::{AddressOriginMap, LoweredProgram, LoweringDiagnostic, LoweringError};

/// The result of lowering a source program.
#[derive(Clone, Debug, PartialEq)]
pub struct Lowered {
    pub program: LoweredProgram,
    pub origins: AddressOriginMap,
    pub diagnostics: Vec<LoweringDiagnostic>,
}

impl Lowered {
    pub fn into_parts(self) -> (LoweredProgram, AddressOriginMap) {
        (self.program, self.origins)
    }
}

/// Lowers a memory-addressed source program onto a register file of
/// `registers` registers.
pub fn lower(source: &[SourceInstruction], registers: usize) -> Result<Lowered, LoweringError> {
    let mut engine = LoweringEngine::new(registers)?;
    for (idx, instr) in source.iter().enumerate() {
        engine.step(idx, instr);
    }
    Ok(engine.complete())
}

/**
 * Rewrites source instructions one at a time into register-addressed
 * instructions.  Memory operands are looked up in the [`ResidencyTable`] and
 * loaded into a register only when no register already caches them.  Every
 * write to a memory cell goes straight through to memory with a STORE, and the
 * register that produced the value becomes the cached copy of that cell.
 *
 * Residency is tracked as if the program were straight-line code: jumps do not
 * invalidate anything, so after a branch the table may claim a register holds
 * a cell that the taken path never loaded.
 */
pub struct LoweringEngine {
    table: ResidencyTable,
    builder: ProgramBuilder,
    diagnostics: Vec<LoweringDiagnostic>,
}

impl LoweringEngine {
    pub fn new(registers: usize) -> Result<LoweringEngine, LoweringError> {
        if registers < MIN_REGISTERS || registers > MAX_REGISTERS {
            return Err(LoweringError::RegisterCount(registers));
        }

        Ok(LoweringEngine {
            table: ResidencyTable::new(registers),
            builder: ProgramBuilder::new(),
            diagnostics: vec![],
        })
    }

    pub fn table(&self) -> &ResidencyTable {
        &self.table
    }

    /// Lowers the source instruction at index `idx`.  Whatever is emitted is
    /// attributed to `idx`, and the residency clock advances exactly once.
    pub fn step(&mut self, idx: usize, instr: &SourceInstruction) {
        self.builder.set_origin(idx);

        match instr.op() {
            Mnemonic::Known(op) => self.lower_op(idx, *op, instr),
            Mnemonic::Unrecognized(word) => {
                warn!("Unrecognized opcode {} at instruction {}", word, idx);
                self.diagnostics.push(LoweringDiagnostic::Unrecognized {
                    index: idx,
                    mnemonic: word.clone(),
                });
            }
        }

        self.table.tick();
        debug!("Processed {}: {}. Registers: {}", idx, instr, self.table);
    }

    pub fn complete(self) -> Lowered {
        let (program, origins) = self.builder.complete();
        Lowered {
            program,
            origins,
            diagnostics: self.diagnostics,
        }
    }

    fn lower_op(&mut self, idx: usize, op: Opcode, instr: &SourceInstruction) {
        use Opcode::*;
        match op {
            Add | Sou | Mul | Div | Equ | Neq | Lt | Le | Gt | Ge | And | Or => {
                let ra = self.resident(instr.b());
                let rb = self.resident(instr.c());
                let rd = self.table.find_victim();
                self.builder.emit(Instruction::new(op, rd as i64, rb as i64, ra as i64));
                self.write_back(rd, instr.a());
            }
            Not => {
                let rs = self.resident(instr.a());
                let rd = self.table.find_victim();
                self.builder.emit(Instruction::new(Not, rd as i64, rs as i64, 0));
                self.write_back(rd, instr.a());
            }
            Cop => {
                let r = self.resident(instr.b());
                self.write_back(r, instr.a());
            }
            Afc => {
                let r = self.table.find_victim();
                self.builder.emit(Instruction::new(Afc, r as i64, instr.b(), 0));
                self.write_back(r, instr.a());
            }
            Load => {
                self.builder.emit(Instruction::new(Load, instr.a(), instr.b(), 0));
                self.refill(idx, instr.a(), instr.b());
            }
            Store => {
                self.builder.emit(Instruction::new(Store, instr.a(), instr.b(), 0));
                self.table.invalidate_address(instr.a());
            }
            Jmf => {
                self.builder.load(SCRATCH_REGISTER, instr.a());
                self.refill(idx, SCRATCH_REGISTER as i64, instr.a());
                self.builder.emit(Instruction::new(Jmf, SCRATCH_REGISTER as i64, instr.b(), 0));
            }
            Jmp | Pri | Ret | Nop | Call | Push | Pop => {
                self.builder
                    .emit(Instruction::new(op, instr.a(), instr.b(), instr.c()))
            }
        }
    }

    /// Returns a register holding the value of `addr`, loading it if no
    /// register caches it.  The register is marked as just used so that the
    /// rest of the current instruction cannot evict it.
    fn resident(&mut self, addr: Address) -> Reg {
        match self.table.locate(addr) {
            Some(r) => {
                self.table.fill(r, addr);
                r
            }
            None => {
                let r = self.table.find_victim();
                self.builder.load(r, addr);
                self.table.fill(r, addr);
                r
            }
        }
    }

    /// Stores `reg` to `dest`; `reg` becomes the only cached copy of `dest`.
    fn write_back(&mut self, reg: Reg, dest: Address) {
        self.builder.store(dest, reg);
        self.table.invalidate_address(dest);
        self.table.fill(reg, dest);
    }

    /// Records that an explicit LOAD overwrote register `reg` with `addr`.
    fn refill(&mut self, idx: usize, reg: i64, addr: Address) {
        if reg <= RESERVED_REGISTER as i64 || reg >= self.table.len() as i64 {
            warn!("LOAD into register {} at instruction {} is not tracked", reg, idx);
            self.diagnostics
                .push(LoweringDiagnostic::UntrackedRegister { index: idx, reg });
            return;
        }

        let reg = reg as Reg;
        self.table.invalidate_register(reg);
        self.table.invalidate_address(addr);
        self.table.fill(reg, addr);
    }
}
