#[cfg(test)]
mod tests {
    use crate::compiler::isa::{Instruction, Mnemonic, Opcode};
    use crate::compiler::reader::{read_source, Reader, ReaderError};

    #[test]
    fn test_binary_instruction() {
        let program = read_source("ADD 2 0 1").unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(program[0], Instruction::new(Mnemonic::Known(Opcode::Add), 2, 0, 1));
    }

    #[test]
    fn test_short_instructions_are_zero_padded() {
        let program = read_source("AFC 0 5\nPRI 0\nRET").unwrap();
        assert_eq!(
            program,
            vec![
                Instruction::new(Opcode::Afc.into(), 0, 5, 0),
                Instruction::new(Opcode::Pri.into(), 0, 0, 0),
                Instruction::new(Opcode::Ret.into(), 0, 0, 0),
            ]
        );
    }

    #[test]
    fn test_comments_labels_and_blank_lines_are_dropped() {
        let text = "
        # compute 5 + 3
        .main
        AFC 0 5

            AFC 1 3
        ";
        let program = read_source(text).unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program[1].b(), 3);
    }

    #[test]
    fn test_padding_operands_are_accepted() {
        // front ends emit every instruction with three operands
        let program = read_source("PRI 4 0 0").unwrap();
        assert_eq!(program[0], Instruction::new(Opcode::Pri.into(), 4, 0, 0));
    }

    #[test]
    fn test_negative_constant() {
        let program = read_source("AFC 3 -12").unwrap();
        assert_eq!(program[0].b(), -12);
    }

    #[test]
    fn test_unrecognized_mnemonic_is_passed_through() {
        let program = read_source("FOO 1 2").unwrap();
        assert_eq!(
            program[0],
            Instruction::new(Mnemonic::Unrecognized("FOO".into()), 1, 2, 0)
        );
    }

    #[test]
    fn test_invalid_integer() {
        let err = read_source("AFC 0 5\nADD 2 x 1").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.inner(), ReaderError::InvalidInteger("x".into()));
    }

    #[test]
    fn test_missing_operands() {
        let err = read_source("\n\nCOP 1").unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(
            err.inner(),
            ReaderError::MissingOperands {
                op: Opcode::Cop,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_too_many_operands() {
        let err = read_source("ADD 1 2 3 4").unwrap_err();
        assert_eq!(err.inner(), ReaderError::TooManyOperands(4));
    }

    #[test]
    fn test_error_message_has_line() {
        let err = read_source("NOT").unwrap_err();
        assert_eq!(format!("{}", err), "L1: NOT expects 1 operands but found 0");
    }

    #[test]
    fn test_reader_reports_every_line() {
        let results = Reader::new("ADD 1\nAFC 0 1\nCOP x 1").read();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert!(results[2].is_err());
    }
}
