use log::{debug, info, trace, warn};

use crate::compiler::isa::{Instruction, Opcode, Operation};
use crate::config::TargetConfig;

use super::{Fault, Flavor, Halt};

/// The state left behind by a program that halted.
#[derive(Clone, Debug, PartialEq)]
pub struct Execution {
    pub memory: Vec<i64>,
    pub registers: Vec<i64>,
    /// Every value printed by PRI, in order
    pub output: Vec<i64>,
    /// Number of instructions executed
    pub steps: u64,
    pub halt: Halt,
}

impl Execution {
    /// Memory cells whose final values differ between two executions.
    pub fn differing_cells(&self, other: &Execution) -> Vec<usize> {
        let len = self.memory.len().max(other.memory.len());
        (0..len)
            .filter(|&i| self.memory.get(i) != other.memory.get(i))
            .collect()
    }
}

/// Runs `program` until it halts on a fresh machine described by `config`.
pub fn execute<M: Operation>(
    program: &[Instruction<M>],
    flavor: Flavor,
    config: &TargetConfig,
) -> Result<Execution, Fault> {
    let mut machine = Machine::new(config.memory_size, config.registers);
    let halt = machine.run(program, flavor, config.max_iterations)?;
    Ok(machine.into_execution(halt))
}

pub struct Machine {
    memory: Vec<i64>,
    registers: Vec<i64>,
    ip: usize,
    /// Base of the current stack frame, moved by PUSH and POP
    offset: i64,
    output: Vec<i64>,
    steps: u64,
}

impl Machine {
    pub fn new(memory_size: usize, registers: usize) -> Machine {
        Machine {
            memory: vec![0; memory_size],
            registers: vec![0; registers],
            ip: 0,
            offset: 0,
            output: vec![],
            steps: 0,
        }
    }

    pub fn into_execution(self, halt: Halt) -> Execution {
        Execution {
            memory: self.memory,
            registers: self.registers,
            output: self.output,
            steps: self.steps,
            halt,
        }
    }

    /// Executes instructions until the instruction pointer leaves the program
    /// or the machine reaches a NOP or an unknown instruction.
    pub fn run<M: Operation>(
        &mut self,
        program: &[Instruction<M>],
        flavor: Flavor,
        max_iterations: u64,
    ) -> Result<Halt, Fault> {
        while self.ip < program.len() {
            if self.steps >= max_iterations {
                return Err(Fault::IterationLimit {
                    limit: max_iterations,
                });
            }
            self.steps += 1;

            let instr = &program[self.ip];
            trace!("ip: {} offset: {} instr: {}", self.ip, self.offset, instr);
            let op = match instr.op().opcode() {
                Some(Opcode::Nop) => {
                    debug!("NOP at {}, halting after {} instructions", self.ip, self.steps);
                    return Ok(Halt::Nop { ip: self.ip });
                }
                Some(op) => op,
                None => {
                    warn!("Unknown instruction: {}", instr.op());
                    return Ok(Halt::UnknownInstruction {
                        ip: self.ip,
                        mnemonic: instr.op().to_string(),
                    });
                }
            };
            self.ip = self.exec(op, instr.operands(), flavor)?;
        }
        debug!("Finished after {} instructions", self.steps);
        Ok(Halt::End)
    }

    /// Executes one instruction and returns the next instruction pointer.
    fn exec(&mut self, op: Opcode, [a, b, c]: [i64; 3], flavor: Flavor) -> Result<usize, Fault> {
        use Opcode::*;
        let next = self.ip + 1;
        match (op, flavor) {
            (Add | Sou | Mul | Div | Equ | Neq | Lt | Le | Gt | Ge | And | Or, _) => {
                match flavor {
                    Flavor::Memory => {
                        let v = self.compute(op, self.mem(b)?, self.mem(c)?)?;
                        self.set_mem(a, v)?;
                    }
                    Flavor::Register => {
                        let v = self.compute(op, self.reg(c)?, self.reg(b)?)?;
                        self.set_reg(a, v)?;
                    }
                }
                Ok(next)
            }
            (Not, Flavor::Memory) => {
                let v = self.mem(a)?;
                self.set_mem(a, (v == 0) as i64)?;
                Ok(next)
            }
            (Not, Flavor::Register) => {
                let v = self.reg(b)?;
                self.set_reg(a, (v == 0) as i64)?;
                Ok(next)
            }
            (Afc, Flavor::Memory) => {
                self.set_mem(a, b)?;
                Ok(next)
            }
            (Afc, Flavor::Register) => {
                self.set_reg(a, b)?;
                Ok(next)
            }
            (Cop, Flavor::Memory) => {
                let v = self.mem(b)?;
                self.set_mem(a, v)?;
                Ok(next)
            }
            (Cop, Flavor::Register) => {
                let v = self.reg(b)?;
                self.set_reg(a, v)?;
                Ok(next)
            }
            (Jmf, _) => {
                let cond = match flavor {
                    Flavor::Memory => self.mem(a)?,
                    Flavor::Register => self.reg(a)?,
                };
                if cond == 0 {
                    self.jump(b)
                } else {
                    Ok(next)
                }
            }
            (Load, _) => {
                let v = self.mem(b)?;
                self.set_reg(a, v)?;
                Ok(next)
            }
            (Store, _) => {
                let v = self.reg(b)?;
                self.set_mem(a, v)?;
                Ok(next)
            }
            (Jmp, _) => self.jump(a),
            (Pri, _) => {
                let v = self.mem(a)?;
                info!("{}", v);
                self.output.push(v);
                Ok(next)
            }
            (Push, _) => {
                self.offset = self.offset.wrapping_add(a);
                Ok(next)
            }
            (Pop, _) => {
                self.offset = self.offset.wrapping_sub(a);
                Ok(next)
            }
            (Call, _) => {
                self.set_mem(0, next as i64)?;
                self.jump(a)
            }
            (Ret, _) => {
                let ret = self.mem(0)?;
                self.jump(ret)
            }
            (Nop, _) => unreachable!("NOP halts the machine before it is executed"),
        }
    }

    fn compute(&self, op: Opcode, x: i64, y: i64) -> Result<i64, Fault> {
        use Opcode::*;
        let v = match op {
            Add => x.wrapping_add(y),
            Sou => x.wrapping_sub(y),
            Mul => x.wrapping_mul(y),
            Div => {
                if y == 0 {
                    return Err(Fault::DivisionByZero { ip: self.ip });
                }
                floor_div(x, y)
            }
            Equ => (x == y) as i64,
            Neq => (x != y) as i64,
            Lt => (x < y) as i64,
            Le => (x <= y) as i64,
            Gt => (x > y) as i64,
            Ge => (x >= y) as i64,
            And => (x != 0 && y != 0) as i64,
            Or => (x != 0 || y != 0) as i64,
            _ => unreachable!("{} is not a binary operation", op),
        };
        Ok(v)
    }

    /// Resolves a frame relative address to an index into memory.
    fn cell(&self, addr: i64) -> Result<usize, Fault> {
        let idx = addr.wrapping_add(self.offset);
        if idx < 0 || idx as usize >= self.memory.len() {
            Err(Fault::MemoryOutOfBounds {
                ip: self.ip,
                address: idx,
            })
        } else {
            Ok(idx as usize)
        }
    }

    fn mem(&self, addr: i64) -> Result<i64, Fault> {
        self.cell(addr).map(|idx| self.memory[idx])
    }

    fn set_mem(&mut self, addr: i64, v: i64) -> Result<(), Fault> {
        let idx = self.cell(addr)?;
        self.memory[idx] = v;
        Ok(())
    }

    fn register(&self, reg: i64) -> Result<usize, Fault> {
        if reg < 0 || reg as usize >= self.registers.len() {
            Err(Fault::RegisterOutOfBounds { ip: self.ip, reg })
        } else {
            Ok(reg as usize)
        }
    }

    fn reg(&self, reg: i64) -> Result<i64, Fault> {
        self.register(reg).map(|r| self.registers[r])
    }

    fn set_reg(&mut self, reg: i64, v: i64) -> Result<(), Fault> {
        let r = self.register(reg)?;
        self.registers[r] = v;
        Ok(())
    }

    fn jump(&self, target: i64) -> Result<usize, Fault> {
        if target < 0 {
            Err(Fault::InvalidJump {
                ip: self.ip,
                target,
            })
        } else {
            Ok(target as usize)
        }
    }
}

/// Division rounding towards negative infinity.
fn floor_div(x: i64, y: i64) -> i64 {
    let q = x.wrapping_div(y);
    if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
        q - 1
    } else {
        q
    }
}
