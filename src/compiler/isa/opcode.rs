use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;

/**
 * The closed set of operations understood by the ROM CPU.  The numeric value
 * of each variant is the byte that is written into the opcode field of a ROM
 * word, so the discriminants must never be reordered.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop = 0,
    Add = 1,
    Mul = 2,
    Sou = 3,
    Div = 4,
    Equ = 5,
    Neq = 6,
    Lt = 7,
    Le = 8,
    Gt = 9,
    Ge = 10,
    Not = 11,
    And = 12,
    Or = 13,
    Jmp = 14,
    Jmf = 15,
    Pri = 16,
    Push = 17,
    Pop = 18,
    Call = 19,
    Ret = 20,
    Afc = 21,
    Load = 22,
    Store = 23,
    Cop = 24,
}

pub const OPCODES: [Opcode; 25] = [
    Opcode::Nop,
    Opcode::Add,
    Opcode::Mul,
    Opcode::Sou,
    Opcode::Div,
    Opcode::Equ,
    Opcode::Neq,
    Opcode::Lt,
    Opcode::Le,
    Opcode::Gt,
    Opcode::Ge,
    Opcode::Not,
    Opcode::And,
    Opcode::Or,
    Opcode::Jmp,
    Opcode::Jmf,
    Opcode::Pri,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Afc,
    Opcode::Load,
    Opcode::Store,
    Opcode::Cop,
];

impl Opcode {
    /// The byte this opcode is encoded as in a ROM word.
    pub fn encoding(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Nop => "NOP",
            Add => "ADD",
            Mul => "MUL",
            Sou => "SOU",
            Div => "DIV",
            Equ => "EQU",
            Neq => "NEQ",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            Not => "NOT",
            And => "AND",
            Or => "OR",
            Jmp => "JMP",
            Jmf => "JMF",
            Pri => "PRI",
            Push => "PUSH",
            Pop => "POP",
            Call => "CALL",
            Ret => "RET",
            Afc => "AFC",
            Load => "LOAD",
            Store => "STORE",
            Cop => "COP",
        }
    }

    /// Number of operands this opcode takes in source text.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            Add | Sou | Mul | Div | Equ | Neq | Lt | Le | Gt | Ge | And | Or => 3,
            Jmf | Afc | Cop | Load | Store => 2,
            Not | Jmp | Pri | Push | Pop | Call => 1,
            Ret | Nop => 0,
        }
    }

    /// True for the `op dest, a, b` group that reads two memory cells and
    /// writes one.
    pub fn is_binary(self) -> bool {
        self.arity() == 3
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OPCODES
            .iter()
            .find(|op| op.mnemonic() == s)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_rom_table() {
        let expected = [
            ("NOP", 0),
            ("ADD", 1),
            ("MUL", 2),
            ("SOU", 3),
            ("DIV", 4),
            ("EQU", 5),
            ("NEQ", 6),
            ("LT", 7),
            ("LE", 8),
            ("GT", 9),
            ("GE", 10),
            ("NOT", 11),
            ("AND", 12),
            ("OR", 13),
            ("JMP", 14),
            ("JMF", 15),
            ("PRI", 16),
            ("PUSH", 17),
            ("POP", 18),
            ("CALL", 19),
            ("RET", 20),
            ("AFC", 21),
            ("LOAD", 22),
            ("STORE", 23),
            ("COP", 24),
        ];
        for (text, code) in expected.iter() {
            let op: Opcode = text.parse().unwrap();
            assert_eq!(op.encoding(), *code, "{}", text);
            assert_eq!(op.to_string(), *text);
        }
    }

    #[test]
    fn mnemonics_are_case_sensitive() {
        assert!("add".parse::<Opcode>().is_err());
        assert!("Add".parse::<Opcode>().is_err());
        assert!("ADD".parse::<Opcode>().is_ok());
    }
}
