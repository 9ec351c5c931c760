//! Three-address IR node definitions and their textual form.
//!
//! A [`Program`] holds one [`Function`] per source function; each function
//! body is a flat instruction list. Basic-block structure is implicit in
//! labels and jumps. Operands are always leaves: a constant, a variable, or
//! a temporary name; instructions never nest.
//!
//! Every instruction renders to the canonical one-line debug form, e.g.
//! `t3 = a + b`, `store t3 -> x`, `t9 = new Point(1, 2)`, `L2:`,
//! `if t1 jump L2 else L3`.

use std::fmt;

use serpc_par::{BinOp, UnOp};
use serpc_util::Symbol;

/// A constant value in an instruction operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Symbol),
    Bool(bool),
    None,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
            Value::Str(value) => write!(f, "{:?}", value.as_str()),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::None => write!(f, "None"),
        }
    }
}

/// An instruction operand: a constant or a variable/temporary name.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Const(Value),
    Var(Symbol),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(value) => write!(f, "{}", value),
            Operand::Var(name) => write!(f, "{}", name),
        }
    }
}

/// A three-address instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// `dest = left op right`
    Binary {
        op: BinOp,
        left: Operand,
        right: Operand,
        dest: Symbol,
    },

    /// `dest = op operand`
    Unary {
        op: UnOp,
        operand: Operand,
        dest: Symbol,
    },

    /// `store source -> dest`
    Store { source: Operand, dest: Symbol },

    /// `dest = load source`
    Load { source: Symbol, dest: Symbol },

    /// `dest = call func(args...)`
    Call {
        func: Symbol,
        args: Vec<Operand>,
        dest: Symbol,
    },

    /// `dest = call object.method(args...)`
    MethodCall {
        object: Operand,
        method: Symbol,
        args: Vec<Operand>,
        dest: Symbol,
    },

    /// `dest = new class(args...)`
    ConstructorCall {
        class: Symbol,
        args: Vec<Operand>,
        dest: Symbol,
    },

    /// `return [value]`
    Return { value: Option<Operand> },

    /// `jump target`
    Jump { target: Symbol },

    /// `if cond jump then_label else else_label`
    CondJump {
        cond: Operand,
        then_label: Symbol,
        else_label: Symbol,
    },

    /// `name:`
    Label { name: Symbol },
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Operand]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Binary {
                op,
                left,
                right,
                dest,
            } => write!(f, "{} = {} {} {}", dest, left, op, right),
            Instr::Unary { op, operand, dest } => match op {
                UnOp::Neg => write!(f, "{} = -{}", dest, operand),
                UnOp::Not => write!(f, "{} = not {}", dest, operand),
            },
            Instr::Store { source, dest } => write!(f, "store {} -> {}", source, dest),
            Instr::Load { source, dest } => write!(f, "{} = load {}", dest, source),
            Instr::Call { func, args, dest } => {
                write!(f, "{} = call {}(", dest, func)?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Instr::MethodCall {
                object,
                method,
                args,
                dest,
            } => {
                write!(f, "{} = call {}.{}(", dest, object, method)?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Instr::ConstructorCall { class, args, dest } => {
                write!(f, "{} = new {}(", dest, class)?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Instr::Return { value } => match value {
                Some(value) => write!(f, "return {}", value),
                None => write!(f, "return"),
            },
            Instr::Jump { target } => write!(f, "jump {}", target),
            Instr::CondJump {
                cond,
                then_label,
                else_label,
            } => write!(f, "if {} jump {} else {}", cond, then_label, else_label),
            Instr::Label { name } => write!(f, "{}:", name),
        }
    }
}

/// A lowered function: name, parameter names, and a linear body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: Vec<Instr>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        writeln!(f, "):")?;
        for (i, instr) in self.body.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "    {}", instr)?;
        }
        Ok(())
    }
}

/// A whole lowered program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}

/// Render a program to its debug text, with a trailing newline.
pub fn render(program: &Program) -> String {
    let mut text = program.to_string();
    if !text.is_empty() {
        text.push('\n');
    }
    text
}
