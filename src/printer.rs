//! 整形出力（pretty-printer）
//!
//! ASTを正規化したソースに戻す。インデントは4スペース、リストは`, `区切り。
//! 括弧は`Expression::Parentheses`がある場所にだけ出力する。
//! 解析済みの木では優先順位がすでに括弧ノードに反映されているため、
//! 出力を再解析するとスパン以外は同じ木になる。

use crate::ast::*;

const INDENT_WIDTH: usize = 4;

/// モジュール全体を整形
pub fn print_module(module: &Module) -> String {
    let mut printer = Printer::new();
    printer.module(module);
    printer.finish()
}

pub fn print_statement(stmt: &Statement) -> String {
    let mut printer = Printer::new();
    printer.statement(stmt);
    printer.output
}

pub fn print_expression(expr: &Expression) -> String {
    let mut printer = Printer::new();
    printer.expression(expr);
    printer.output
}

pub fn print_type(ty: &Type) -> String {
    let mut printer = Printer::new();
    printer.ty(ty);
    printer.output
}

struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn finish(mut self) -> String {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        for _ in 0..self.indent * INDENT_WIDTH {
            self.output.push(' ');
        }
    }

    fn separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }

    fn string(&mut self, lit: &StringLit) {
        self.emit("\"");
        self.emit(&lit.raw);
        self.emit("\"");
    }

    fn visibility(&mut self, is_public: bool, is_exported: bool) {
        if is_public {
            self.emit("pub ");
        }
        if is_exported {
            self.emit("export ");
        }
    }

    // --- Items ---

    fn module(&mut self, module: &Module) {
        let mut previous: Option<&Item> = None;
        for item in &module.items {
            if let Some(prev) = previous {
                // 関数の前後は1行空ける
                if matches!(prev, Item::Function(_)) || matches!(item, Item::Function(_)) {
                    self.emit_newline();
                }
            }
            self.item(item);
            self.emit_newline();
            previous = Some(item);
        }
    }

    fn item(&mut self, item: &Item) {
        match item {
            Item::ModuleSpecifier(spec) => {
                self.emit("module ");
                self.emit(&spec.name);
                self.emit(";");
            }
            Item::Import(import) => {
                self.emit("import ");
                self.string(&import.path);
                self.emit(";");
            }
            Item::Constant(decl) => self.constant(decl),
            Item::Variable(decl) => self.variable(decl),
            Item::ExternVariable(decl) => {
                self.visibility(decl.is_public, false);
                self.emit("extern ");
                self.emit(&decl.name);
                self.emit(" ");
                self.ty(&decl.ty);
                self.emit(";");
            }
            Item::TypeAlias(alias) => {
                self.visibility(alias.is_public, false);
                self.emit("type ");
                self.emit(&alias.name);
                self.emit(" = ");
                self.ty(&alias.ty);
                self.emit(";");
            }
            Item::Function(func) => {
                self.visibility(func.is_public, func.is_exported);
                self.emit("fn ");
                self.emit(&func.name);
                self.parameters(&func.params, func.is_variadic);
                if let Some(ret) = &func.return_type {
                    self.emit(" ");
                    self.ty(ret);
                }
                self.emit(" ");
                self.block(&func.body);
            }
            Item::ExternFunction(func) => {
                self.visibility(func.is_public, false);
                self.emit("extern fn ");
                self.emit(&func.name);
                self.parameters(&func.params, func.is_variadic);
                if let Some(ret) = &func.return_type {
                    self.emit(" ");
                    self.ty(ret);
                }
                self.emit(";");
            }
            Item::GlobalAssembly(asm) => {
                if asm.templates.is_empty() {
                    self.emit("asm {}");
                    return;
                }
                self.emit("asm {");
                self.emit_newline();
                self.indent += 1;
                for template in &asm.templates {
                    self.emit_indent();
                    self.string(template);
                    self.emit_newline();
                }
                self.indent -= 1;
                self.emit_indent();
                self.emit("}");
            }
        }
    }

    fn constant(&mut self, decl: &ConstantDecl) {
        self.visibility(decl.is_public, false);
        self.emit("const ");
        self.emit(&decl.name);
        self.emit(" = ");
        self.expression(&decl.value);
        self.emit(";");
    }

    fn variable(&mut self, decl: &VariableDecl) {
        self.visibility(decl.is_public, decl.is_exported);
        self.emit("var ");
        self.emit(&decl.name);
        if let Some(ty) = &decl.ty {
            self.emit(" ");
            self.ty(ty);
        }
        if let Some(init) = &decl.init {
            self.emit(" = ");
            self.expression(init);
        }
        self.emit(";");
    }

    fn parameters(&mut self, params: &[Parameter], is_variadic: bool) {
        self.emit("(");
        self.separated(params, |p, param| {
            p.emit(&param.name);
            p.emit(" ");
            p.ty(&param.ty);
        });
        if is_variadic {
            if !params.is_empty() {
                self.emit(", ");
            }
            self.emit("...");
        }
        self.emit(")");
    }

    // --- Statements ---

    fn block(&mut self, block: &Block) {
        if block.statements.is_empty() {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.emit_newline();
        self.indent += 1;
        for stmt in &block.statements {
            self.emit_indent();
            self.statement(stmt);
            self.emit_newline();
        }
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(block) => self.block(block),
            Statement::If(stmt) => self.if_statement(stmt),
            Statement::While(stmt) => {
                self.emit("while ");
                self.expression(&stmt.condition);
                self.emit(" ");
                self.block(&stmt.body);
            }
            Statement::Break(_) => self.emit("break;"),
            Statement::Continue(_) => self.emit("continue;"),
            Statement::Defer(stmt) => {
                self.emit("defer ");
                self.statement(&stmt.body);
            }
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => {
                    self.emit("return ");
                    self.expression(value);
                    self.emit(";");
                }
                None => self.emit("return;"),
            },
            Statement::Expression(expr) => {
                self.expression(expr);
                self.emit(";");
            }
            Statement::Constant(decl) => self.constant(decl),
            Statement::Variable(decl) => self.variable(decl),
            Statement::Switch(stmt) => self.switch_statement(stmt),
        }
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        self.emit("if ");
        self.expression(&stmt.condition);
        self.emit(" ");
        self.block(&stmt.then_branch);
        match &stmt.else_branch {
            Some(ElseBranch::If(nested)) => {
                self.emit(" else ");
                self.if_statement(nested);
            }
            Some(ElseBranch::Block(block)) => {
                self.emit(" else ");
                self.block(block);
            }
            None => {}
        }
    }

    fn switch_statement(&mut self, stmt: &SwitchStatement) {
        self.emit("switch (");
        self.expression(&stmt.scrutinee);
        self.emit(") {");
        self.emit_newline();
        self.indent += 1;
        for case in &stmt.cases {
            self.emit_indent();
            match &case.matcher {
                CaseMatcher::Else => self.emit("else"),
                CaseMatcher::Values(values) => self.separated(values, |p, v| p.expression(v)),
            }
            self.emit(" => ");
            self.statement(&case.body);
            self.emit_newline();
        }
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    // --- Expressions ---

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Identifier(id) => self.emit(&id.name),
            Expression::SpecialIdentifier(id) => {
                self.emit("@");
                self.emit(&id.name);
            }
            Expression::String(lit) => self.string(lit),
            Expression::Character(lit) => {
                self.emit("'");
                self.emit(&lit.raw);
                self.emit("'");
            }
            Expression::Integer(lit) => self.emit(&lit.text),
            Expression::Float(lit) => self.emit(&lit.text),
            Expression::Parentheses(paren) => {
                self.emit("(");
                self.expression(&paren.inner);
                self.emit(")");
            }
            Expression::Unary(unary) => {
                self.emit(unary.op.symbol());
                self.expression(&unary.operand);
            }
            Expression::Binary(binary) => {
                self.expression(&binary.left);
                self.emit(" ");
                self.emit(binary.op.symbol());
                self.emit(" ");
                self.expression(&binary.right);
            }
            Expression::Call(call) => {
                self.expression(&call.callee);
                self.emit("(");
                self.separated(&call.args, |p, arg| p.expression(arg));
                self.emit(")");
            }
            Expression::Assign(assign) => {
                self.expression(&assign.target);
                self.emit(" ");
                self.emit(assign.op.symbol());
                self.emit(" ");
                self.expression(&assign.value);
            }
            Expression::Subscript(subscript) => {
                self.expression(&subscript.target);
                self.emit("[");
                self.expression(&subscript.index);
                self.emit("]");
            }
            Expression::Member(member) => {
                self.expression(&member.target);
                self.emit(".");
                match &member.key {
                    MemberKey::Identifier(name) => self.emit(name),
                    MemberKey::Wildcard => self.emit("*"),
                }
            }
            Expression::Cast(cast) => {
                self.expression(&cast.expr);
                self.emit(" as ");
                self.ty(&cast.ty);
            }
            Expression::InlineAssembly(asm) => self.inline_assembly(asm),
        }
    }

    fn inline_assembly(&mut self, asm: &InlineAssembly) {
        self.emit("asm { ");
        for (i, template) in asm.templates.iter().enumerate() {
            if i > 0 {
                self.emit(" ");
            }
            self.string(template);
        }

        if let Some(output) = &asm.output {
            self.emit(" :");
            for operand in &output.operands {
                self.emit(" ");
                self.string(&operand.constraint);
                self.emit("(");
                self.ty(&operand.ty);
                self.emit(")");
            }
        }
        if let Some(inputs) = &asm.inputs {
            self.emit(" :");
            if !inputs.is_empty() {
                self.emit(" ");
                self.separated(&inputs.operands, |p, input| {
                    p.string(&input.constraint);
                    p.emit("(");
                    p.expression(&input.value);
                    p.emit(")");
                });
            }
        }
        if let Some(clobbers) = &asm.clobbers {
            self.emit(" :");
            if !clobbers.is_empty() {
                self.emit(" ");
                self.separated(&clobbers.operands, |p, clobber| p.string(clobber));
            }
        }
        self.emit(" }");
    }

    // --- Types ---

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Named(named) => self.emit(&named.name),
            Type::Struct(st) => {
                if st.fields.is_empty() {
                    self.emit("struct {}");
                    return;
                }
                self.emit("struct { ");
                self.separated(&st.fields, |p, field| {
                    p.emit(&field.name);
                    p.emit(" ");
                    p.ty(&field.ty);
                });
                self.emit(" }");
            }
            Type::Enum(en) => {
                self.emit("enum ");
                if let Some(backing) = &en.backing {
                    self.ty(backing);
                    self.emit(" ");
                }
                if en.members.is_empty() {
                    self.emit("{}");
                    return;
                }
                self.emit("{ ");
                self.separated(&en.members, |p, member| {
                    p.emit(&member.name);
                    if let Some(value) = &member.value {
                        p.emit(" = ");
                        p.emit(&value.text);
                    }
                });
                self.emit(" }");
            }
            Type::Array(array) => {
                self.emit("[");
                match &array.size {
                    ArraySize::Integer(lit) => self.emit(&lit.text),
                    ArraySize::Named { name, .. } => self.emit(name),
                }
                self.emit("]");
                self.ty(&array.element);
            }
            Type::Slice(slice) => {
                self.emit(if slice.is_const { "[]const " } else { "[]" });
                self.ty(&slice.element);
            }
            Type::Pointer(ptr) => {
                self.emit(if ptr.is_many { "[*]" } else { "*" });
                if ptr.is_const {
                    self.emit("const ");
                }
                self.ty(&ptr.pointee);
            }
            Type::Function(func) => {
                self.emit("fn(");
                self.separated(&func.params, |p, param| p.ty(param));
                if func.is_variadic {
                    if !func.params.is_empty() {
                        self.emit(", ");
                    }
                    self.emit("...");
                }
                self.emit(")");
                if let Some(ret) = &func.return_type {
                    self.emit(" ");
                    self.ty(ret);
                }
            }
        }
    }
}
