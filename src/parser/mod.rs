pub mod ast;

use crate::parser::ast::{
    BlockStatement, ClassDeclarationStatement, ExpressionStatement, FunctionDeclaration,
    IfElseStatement, PrintStatement, ReturnStatement, Statement, VariableDeclarationStatement,
    VariableReferenceExpression, WhileStatement,
};
use crate::reporter::Reporter;
use crate::scanner::{Token, TokenDiscriminant, TokenType};
use ast::{Expression, ExprId, LiteralExpression};
use std::fmt::Write;
use std::iter::Peekable;
use std::rc::Rc;

#[derive(PartialEq, Eq, Copy, Clone)]
enum ParsingMode {
    ErrorRecovery,
    Normal,
}

pub struct Parser<'r, 'sink, TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    tokens: Peekable<Source<TokenIter>>,
    reporter: &'r mut Reporter<'sink>,
    mode: ParsingMode,
    // How many `for`/`while` bodies enclose the current position.
    // Reset to zero across function boundaries.
    loop_depth: u32,
    previous_line: u64,
}

impl<'r, 'sink, TokenIter> Parser<'r, 'sink, TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    /// Parse a token stream into a list of statements.
    ///
    /// Syntax errors are reported through the [`Reporter`]; the parser
    /// synchronizes at statement boundaries and keeps going, so a single run
    /// can surface several diagnostics. Statements that failed to parse are
    /// dropped from the output.
    pub fn parse(tokens: TokenIter, reporter: &'r mut Reporter<'sink>) -> Vec<Statement> {
        let mut parser = Parser {
            tokens: Source(tokens).peekable(),
            reporter,
            mode: ParsingMode::Normal,
            loop_depth: 0,
            previous_line: 1,
        };

        let mut statements = vec![];
        while !parser.is_at_end() {
            if let Some(statement) = parser.declaration() {
                statements.push(statement);
            }
        }
        statements
    }

    fn declaration(&mut self) -> Option<Statement> {
        let statement = if self.advance_on_match(&[TokenDiscriminant::Class]).is_some() {
            self.class_declaration().map(Statement::ClassDeclaration)
        } else if self.advance_on_match(&[TokenDiscriminant::Fun]).is_some() {
            self.function("function")
                .map(|f| Statement::FunctionDeclaration(Rc::new(f)))
        } else if self.advance_on_match(&[TokenDiscriminant::Var]).is_some() {
            self.variable_declaration()
                .map(Statement::VariableDeclaration)
        } else {
            self.statement()
        };
        if statement.is_none() {
            self.advance_until_recovery_point();
        }
        statement
    }

    fn variable_declaration(&mut self) -> Option<VariableDeclarationStatement> {
        let identifier = self.expect(TokenDiscriminant::Identifier, "Expect variable name.")?;
        let mut initializer = None;
        if self.advance_on_match(&[TokenDiscriminant::Equal]).is_some() {
            initializer = Some(self.expression()?);
        }
        self.expect(
            TokenDiscriminant::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Some(VariableDeclarationStatement {
            initializer,
            identifier,
        })
    }

    fn class_declaration(&mut self) -> Option<ClassDeclarationStatement> {
        let name = self.expect(TokenDiscriminant::Identifier, "Expect class name.")?;

        let superclass = if self.advance_on_match(&[TokenDiscriminant::Less]).is_some() {
            let identifier =
                self.expect(TokenDiscriminant::Identifier, "Expect superclass name.")?;
            Some(VariableReferenceExpression {
                id: ExprId::fresh(),
                identifier,
            })
        } else {
            None
        };

        self.expect(TokenDiscriminant::LeftBrace, "Expect '{' before class body.")?;
        let mut methods = vec![];
        while !self.check(TokenDiscriminant::RightBrace) && !self.is_at_end() {
            methods.push(Rc::new(self.function("method")?));
        }
        self.expect(TokenDiscriminant::RightBrace, "Expect '}' after class body.")?;

        Some(ClassDeclarationStatement {
            name,
            superclass,
            methods,
        })
    }

    fn function(&mut self, kind: &str) -> Option<FunctionDeclaration> {
        let name = self.expect(
            TokenDiscriminant::Identifier,
            &format!("Expect {kind} name."),
        )?;
        self.expect(
            TokenDiscriminant::LeftParen,
            &format!("Expect '(' after {kind} name."),
        )?;

        // Function parameters
        let mut parameters = vec![];
        if !self.check(TokenDiscriminant::RightParen) {
            loop {
                if parameters.len() >= 255 {
                    self.report_at_upcoming_without_unwinding(
                        "Can't have more than 255 parameters.",
                    );
                }
                parameters.push(
                    self.expect(TokenDiscriminant::Identifier, "Expect parameter name.")?,
                );
                if self.advance_on_match(&[TokenDiscriminant::Comma]).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenDiscriminant::RightParen, "Expect ')' after parameters.")?;

        // Body. `break` may not cross a function boundary, so the loop
        // counter is stashed and restored around it.
        self.expect(
            TokenDiscriminant::LeftBrace,
            &format!("Expect '{{' before {kind} body."),
        )?;
        let enclosing_loop_depth = std::mem::take(&mut self.loop_depth);
        let body = self.block_statement();
        self.loop_depth = enclosing_loop_depth;

        Some(FunctionDeclaration {
            name,
            parameters,
            body: body?.0,
        })
    }

    fn statement(&mut self) -> Option<Statement> {
        if self.advance_on_match(&[TokenDiscriminant::Print]).is_some() {
            self.print_statement().map(Statement::Print)
        } else if self.advance_on_match(&[TokenDiscriminant::While]).is_some() {
            self.while_statement().map(Statement::While)
        } else if self.advance_on_match(&[TokenDiscriminant::For]).is_some() {
            self.for_statement()
        } else if self.advance_on_match(&[TokenDiscriminant::If]).is_some() {
            self.if_else_statement().map(Statement::IfElse)
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::Return]) {
            self.return_statement(keyword).map(Statement::Return)
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::Break]) {
            self.break_statement(keyword)
        } else if self
            .advance_on_match(&[TokenDiscriminant::LeftBrace])
            .is_some()
        {
            self.block_statement().map(Statement::Block)
        } else {
            self.expression_statement().map(Statement::Expression)
        }
    }

    fn for_statement(&mut self) -> Option<Statement> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'for'.")?;
        let initializer = if self
            .advance_on_match(&[TokenDiscriminant::Semicolon])
            .is_some()
        {
            None
        } else if self.advance_on_match(&[TokenDiscriminant::Var]).is_some() {
            Some(Statement::VariableDeclaration(
                self.variable_declaration()?,
            ))
        } else {
            Some(Statement::Expression(self.expression_statement()?))
        };
        let condition = if self.check(TokenDiscriminant::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::Semicolon,
            "Expect ';' after loop condition.",
        )?;
        let increment = if self.check(TokenDiscriminant::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after for clauses.",
        )?;

        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        let mut body = body?;

        // De-sugaring the for loop into an equivalent while loop
        if let Some(increment) = increment {
            body = Statement::Block(BlockStatement(vec![
                body,
                Statement::Expression(ExpressionStatement(increment)),
            ]))
        }

        body = Statement::While(WhileStatement {
            condition: condition.unwrap_or_else(|| Expression::boolean(true)),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Statement::Block(BlockStatement(vec![initializer, body]))
        }

        Some(body)
    }

    fn block_statement(&mut self) -> Option<BlockStatement> {
        let mut statements = vec![];

        while !self.check(TokenDiscriminant::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.expect(TokenDiscriminant::RightBrace, "Expect '}' after block.")?;
        Some(BlockStatement(statements))
    }

    fn while_statement(&mut self) -> Option<WhileStatement> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.expect(TokenDiscriminant::RightParen, "Expect ')' after condition.")?;
        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        Some(WhileStatement {
            condition,
            body: Box::new(body?),
        })
    }

    fn if_else_statement(&mut self) -> Option<IfElseStatement> {
        self.expect(TokenDiscriminant::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.expect(
            TokenDiscriminant::RightParen,
            "Expect ')' after if condition.",
        )?;
        let if_branch = self.statement()?;
        let mut else_branch = None;
        if self.advance_on_match(&[TokenDiscriminant::Else]).is_some() {
            else_branch = Some(Box::new(self.statement()?));
        }
        Some(IfElseStatement {
            condition,
            if_branch: Box::new(if_branch),
            else_branch,
        })
    }

    fn print_statement(&mut self) -> Option<PrintStatement> {
        let expr = self.expression()?;
        self.expect(TokenDiscriminant::Semicolon, "Expect ';' after value.")?;
        Some(PrintStatement(expr))
    }

    fn return_statement(&mut self, keyword: Token) -> Option<ReturnStatement> {
        let value = if self.check(TokenDiscriminant::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(
            TokenDiscriminant::Semicolon,
            "Expect ';' after return value.",
        )?;
        Some(ReturnStatement { keyword, value })
    }

    fn break_statement(&mut self, keyword: Token) -> Option<Statement> {
        if self.loop_depth == 0 {
            // Reported, but parsing carries on: the statement itself is
            // well-formed.
            self.reporter
                .error_at(&keyword, "Must be inside a loop to use 'break'.");
        }
        self.expect(TokenDiscriminant::Semicolon, "Expect ';' after 'break'.")?;
        Some(Statement::Break)
    }

    fn expression_statement(&mut self) -> Option<ExpressionStatement> {
        let expr = self.expression()?;
        self.expect(TokenDiscriminant::Semicolon, "Expect ';' after expression.")?;
        Some(ExpressionStatement(expr))
    }

    fn expression(&mut self) -> Option<Expression> {
        self.assignment()
    }

    fn assignment(&mut self) -> Option<Expression> {
        let expr = self.or()?;

        if let Some(equals) = self.advance_on_match(&[TokenDiscriminant::Equal]) {
            let value = self.assignment()?;
            match expr {
                Expression::VariableReference(variable) => {
                    Some(Expression::variable_assignment(variable.identifier, value))
                }
                Expression::PropertyGet(get) => {
                    Some(Expression::property_set(*get.object, get.name, value))
                }
                expr => {
                    self.reporter.error_at(&equals, "Invalid assignment target.");
                    Some(expr)
                }
            }
        } else {
            Some(expr)
        }
    }

    fn or(&mut self) -> Option<Expression> {
        let mut expr = self.and()?;

        while let Some(operator) = self.advance_on_match(&[TokenDiscriminant::Or]) {
            expr = Expression::logical(expr, operator, self.and()?);
        }
        Some(expr)
    }

    fn and(&mut self) -> Option<Expression> {
        let mut expr = self.equality()?;

        while let Some(operator) = self.advance_on_match(&[TokenDiscriminant::And]) {
            expr = Expression::logical(expr, operator, self.equality()?);
        }
        Some(expr)
    }

    fn equality(&mut self) -> Option<Expression> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::BangEqual,
            TokenDiscriminant::EqualEqual,
        ]) {
            expr = Expression::binary(expr, operator, self.comparison()?);
        }
        Some(expr)
    }

    fn comparison(&mut self) -> Option<Expression> {
        let mut expr = self.term()?;

        while let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::Greater,
            TokenDiscriminant::GreaterEqual,
            TokenDiscriminant::Less,
            TokenDiscriminant::LessEqual,
        ]) {
            expr = Expression::binary(expr, operator, self.term()?);
        }
        Some(expr)
    }

    fn term(&mut self) -> Option<Expression> {
        let mut expr = self.factor()?;

        while let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Minus, TokenDiscriminant::Plus])
        {
            expr = Expression::binary(expr, operator, self.factor()?);
        }
        Some(expr)
    }

    fn factor(&mut self) -> Option<Expression> {
        let mut expr = self.unary()?;

        while let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Slash, TokenDiscriminant::Star])
        {
            expr = Expression::binary(expr, operator, self.unary()?);
        }
        Some(expr)
    }

    fn unary(&mut self) -> Option<Expression> {
        if let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Bang, TokenDiscriminant::Minus])
        {
            Some(Expression::unary(operator, self.unary()?))
        } else {
            self.call()
        }
    }

    fn call(&mut self) -> Option<Expression> {
        let mut callee = self.primary()?;

        loop {
            if self
                .advance_on_match(&[TokenDiscriminant::LeftParen])
                .is_some()
            {
                callee = self.finish_call(callee)?;
            } else if self.advance_on_match(&[TokenDiscriminant::Dot]).is_some() {
                let name = self.expect(
                    TokenDiscriminant::Identifier,
                    "Expect property name after '.'.",
                )?;
                callee = Expression::property_get(callee, name);
            } else {
                break;
            }
        }
        Some(callee)
    }

    fn finish_call(&mut self, callee: Expression) -> Option<Expression> {
        let mut arguments = vec![];
        if !self.check(TokenDiscriminant::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    self.report_at_upcoming_without_unwinding(
                        "Can't have more than 255 arguments.",
                    );
                }
                arguments.push(self.expression()?);
                if self.advance_on_match(&[TokenDiscriminant::Comma]).is_none() {
                    break;
                }
            }
        }
        let closing_parenthesis =
            self.expect(TokenDiscriminant::RightParen, "Expect ')' after arguments.")?;
        Some(Expression::call(callee, closing_parenthesis, arguments))
    }

    fn primary(&mut self) -> Option<Expression> {
        if self.advance_on_match(&[TokenDiscriminant::True]).is_some() {
            Some(Expression::boolean(true))
        } else if self.advance_on_match(&[TokenDiscriminant::False]).is_some() {
            Some(Expression::boolean(false))
        } else if self.advance_on_match(&[TokenDiscriminant::Nil]).is_some() {
            Some(Expression::null())
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::Number]) {
            match t.ty() {
                TokenType::Number(n) => Some(Expression::number(*n)),
                _ => unreachable!("a `Number` token always carries a numeric payload"),
            }
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::String]) {
            match t.ty() {
                TokenType::String(s) => Some(Expression::string(s.clone())),
                _ => unreachable!("a `String` token always carries a string payload"),
            }
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::This]) {
            Some(Expression::this(keyword))
        } else if let Some(keyword) = self.advance_on_match(&[TokenDiscriminant::Super]) {
            self.expect(TokenDiscriminant::Dot, "Expect '.' after 'super'.")?;
            let method = self.expect(
                TokenDiscriminant::Identifier,
                "Expect superclass method name.",
            )?;
            Some(Expression::superclass_method(keyword, method))
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::Identifier]) {
            Some(Expression::variable_reference(t))
        } else if self
            .advance_on_match(&[TokenDiscriminant::LeftParen])
            .is_some()
        {
            let expr = self.expression()?;
            self.expect(
                TokenDiscriminant::RightParen,
                "Expect ')' after expression.",
            )?;
            Some(Expression::grouping(expr))
        } else {
            self.unexpected_primary()
        }
    }

    /// Error productions for a primary position.
    ///
    /// A binary operator with no left-hand operand gets a dedicated
    /// diagnostic; the would-be right operand is consumed at the operator's
    /// own precedence so that recovery resumes at a sensible place.
    fn unexpected_primary(&mut self) -> Option<Expression> {
        if let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::BangEqual,
            TokenDiscriminant::EqualEqual,
        ]) {
            let _ = self.comparison();
            self.report_at(&operator, "Missing left-hand operand.");
            None
        } else if let Some(operator) = self.advance_on_match(&[
            TokenDiscriminant::Greater,
            TokenDiscriminant::GreaterEqual,
            TokenDiscriminant::Less,
            TokenDiscriminant::LessEqual,
        ]) {
            let _ = self.term();
            self.report_at(&operator, "Missing left-hand operand.");
            None
        } else if let Some(operator) = self.advance_on_match(&[TokenDiscriminant::Plus]) {
            let _ = self.factor();
            self.report_at(&operator, "Missing left-hand operand.");
            None
        } else if let Some(operator) =
            self.advance_on_match(&[TokenDiscriminant::Slash, TokenDiscriminant::Star])
        {
            let _ = self.unary();
            self.report_at(&operator, "Missing left-hand operand.");
            None
        } else if let Some(t) = self.advance_on_match(&[TokenDiscriminant::SyntaxError]) {
            let message = match t.ty() {
                TokenType::SyntaxError { error_msg } => error_msg.unwrap_or("Unexpected character."),
                _ => unreachable!("matched on the `SyntaxError` discriminant"),
            };
            self.report_at(&t, message);
            None
        } else {
            self.report_at_upcoming("Expect expression.");
            None
        }
    }

    fn advance_on_match(&mut self, token_types: &[TokenDiscriminant]) -> Option<Token> {
        let upcoming = self.peek()?;
        if token_types.contains(&upcoming.discriminant()) {
            return self.advance();
        }
        None
    }

    /// Skip tokens until the likely beginning of the next statement, then
    /// re-arm normal parsing.
    fn advance_until_recovery_point(&mut self) {
        self.mode = ParsingMode::Normal;
        while let Some(upcoming) = self.tokens.peek() {
            match upcoming.discriminant() {
                TokenDiscriminant::Eof => return,
                TokenDiscriminant::Class
                | TokenDiscriminant::Fun
                | TokenDiscriminant::Var
                | TokenDiscriminant::For
                | TokenDiscriminant::If
                | TokenDiscriminant::While
                | TokenDiscriminant::Print
                | TokenDiscriminant::Return => return,
                TokenDiscriminant::Semicolon => {
                    self.tokens.next();
                    return;
                }
                _ => {
                    self.tokens.next();
                }
            }
        }
    }

    fn expect(&mut self, token_type: TokenDiscriminant, message: &str) -> Option<Token> {
        let t = self.advance_on_match(&[token_type]);
        if t.is_none() {
            self.report_at_upcoming(message);
        }
        t
    }

    /// Report at the given token and begin unwinding to the nearest recovery
    /// point. Only the first diagnostic of an unwind is recorded.
    fn report_at(&mut self, token: &Token, message: &str) {
        if self.mode == ParsingMode::ErrorRecovery {
            return;
        }
        self.mode = ParsingMode::ErrorRecovery;
        self.reporter.error_at(token, message);
    }

    fn report_at_upcoming(&mut self, message: &str) {
        if self.mode == ParsingMode::ErrorRecovery {
            return;
        }
        self.mode = ParsingMode::ErrorRecovery;
        match self.tokens.peek().cloned() {
            Some(token) => self.reporter.error_at(&token, message),
            None => self.reporter.error(self.previous_line, message),
        }
    }

    /// Report at the upcoming token without abandoning the current
    /// production (used for the 255-argument cap).
    fn report_at_upcoming_without_unwinding(&mut self, message: &str) {
        if let Some(token) = self.tokens.peek().cloned() {
            self.reporter.error_at(&token, message);
        }
    }

    fn check(&mut self, token_type: TokenDiscriminant) -> bool {
        self.peek()
            .map(|t| t.discriminant() == token_type)
            .unwrap_or(false)
    }

    fn advance(&mut self) -> Option<Token> {
        if self.mode == ParsingMode::Normal {
            let token = self.tokens.next();
            if let Some(t) = &token {
                self.previous_line = t.line();
            }
            token
        } else {
            None
        }
    }

    fn peek(&mut self) -> Option<&Token> {
        if self.mode == ParsingMode::Normal {
            self.tokens.peek()
        } else {
            None
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.tokens
            .peek()
            .map(|t| t.discriminant() == TokenDiscriminant::Eof)
            .unwrap_or(true)
    }
}

/// Our parser does not care about trivia tokens.
/// We give `Source` to our parser instead of the raw token stream: `Source` wraps the underlying
/// token stream and makes sure to skip all trivia tokens, making them invisible to the parser.
struct Source<TokenIter>(TokenIter)
where
    TokenIter: Iterator<Item = Token>;

impl<TokenIter> Iterator for Source<TokenIter>
where
    TokenIter: Iterator<Item = Token>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.0.next() {
                None => break None,
                Some(t) if t.discriminant() == TokenDiscriminant::Trivia => continue,
                Some(t) => break Some(t),
            }
        }
    }
}

#[allow(unused)]
pub fn display_ast(s: &Statement) -> Result<String, std::fmt::Error> {
    let mut buffer = String::new();
    _display_statement(&mut buffer, s, 0)?;
    Ok(buffer)
}

fn _display_statement(w: &mut impl Write, s: &Statement, depth: u8) -> Result<(), std::fmt::Error> {
    write!(w, "{}", " ".repeat(depth as usize))?;
    match s {
        Statement::Expression(ExpressionStatement(e)) => {
            writeln!(w, "Expression")?;
            _display_expression(w, e, depth + 1)?;
        }
        Statement::Print(PrintStatement(e)) => {
            writeln!(w, "Print")?;
            _display_expression(w, e, depth + 1)?;
        }
        Statement::VariableDeclaration(VariableDeclarationStatement {
            initializer,
            identifier,
        }) => {
            writeln!(w, "Variable Declaration")?;
            _display_token(w, identifier, depth + 1)?;
            if let Some(e) = initializer {
                _display_expression(w, e, depth + 1)?;
            }
        }
        Statement::Block(BlockStatement(statements)) => {
            writeln!(w, "Block")?;
            for statement in statements {
                _display_statement(w, statement, depth + 1)?;
            }
        }
        Statement::IfElse(IfElseStatement {
            condition,
            if_branch,
            else_branch,
        }) => {
            writeln!(w, "IfElse")?;
            _display_expression(w, condition, depth + 1)?;
            _display_statement(w, if_branch, depth + 1)?;
            if let Some(else_branch) = else_branch {
                _display_statement(w, else_branch, depth + 1)?;
            }
        }
        Statement::While(WhileStatement { condition, body }) => {
            writeln!(w, "While")?;
            _display_expression(w, condition, depth + 1)?;
            _display_statement(w, body, depth + 1)?;
        }
        Statement::Break => {
            writeln!(w, "Break")?;
        }
        Statement::Return(ReturnStatement { value, .. }) => {
            writeln!(w, "Return")?;
            if let Some(value) = value {
                _display_expression(w, value, depth + 1)?;
            }
        }
        Statement::FunctionDeclaration(declaration) => {
            writeln!(w, "Function Declaration")?;
            _display_function(w, declaration, depth + 1)?;
        }
        Statement::ClassDeclaration(ClassDeclarationStatement {
            name,
            superclass,
            methods,
        }) => {
            writeln!(w, "Class Declaration")?;
            _display_token(w, name, depth + 1)?;
            if let Some(superclass) = superclass {
                _display_string(w, "Superclass", depth + 1)?;
                _display_token(w, &superclass.identifier, depth + 2)?;
            }
            _display_string(w, "Methods", depth + 1)?;
            for method in methods {
                _display_function(w, method, depth + 2)?;
            }
        }
    }
    Ok(())
}

fn _display_function(
    w: &mut impl Write,
    declaration: &FunctionDeclaration,
    depth: u8,
) -> Result<(), std::fmt::Error> {
    write!(w, "{}", " ".repeat(depth as usize))?;
    writeln!(w, "Function")?;
    _display_token(w, &declaration.name, depth + 1)?;
    _display_string(w, "Parameters", depth + 1)?;
    for parameter in &declaration.parameters {
        _display_token(w, parameter, depth + 2)?;
    }
    _display_string(w, "Body", depth + 1)?;
    for s in &declaration.body {
        _display_statement(w, s, depth + 2)?;
    }
    Ok(())
}

fn _display_expression(
    w: &mut impl Write,
    e: &Expression,
    depth: u8,
) -> Result<(), std::fmt::Error> {
    write!(w, "{}", " ".repeat(depth as usize))?;
    match e {
        Expression::Binary(b) => {
            writeln!(w, "Binary")?;
            _display_expression(w, &b.left, depth + 1)?;
            _display_token(w, &b.operator, depth + 1)?;
            _display_expression(w, &b.right, depth + 1)?;
        }
        Expression::Logical(l) => {
            writeln!(w, "Logical")?;
            _display_expression(w, &l.left, depth + 1)?;
            _display_token(w, &l.operator, depth + 1)?;
            _display_expression(w, &l.right, depth + 1)?;
        }
        Expression::Unary(u) => {
            writeln!(w, "Unary")?;
            _display_token(w, &u.operator, depth + 1)?;
            _display_expression(w, &u.operand, depth + 1)?;
        }
        Expression::Literal(l) => {
            writeln!(w, "Literal")?;
            write!(w, "{}", " ".repeat((depth + 1) as usize))?;
            match l {
                LiteralExpression::Null => writeln!(w, "Nil")?,
                LiteralExpression::String(s) => writeln!(w, "String \"{s}\"")?,
                LiteralExpression::Number(n) => writeln!(w, "Number {n}")?,
                LiteralExpression::Boolean(b) => {
                    writeln!(w, "{}", if *b { "True" } else { "False" })?
                }
            }
        }
        Expression::Grouping(g) => {
            writeln!(w, "Grouping")?;
            _display_expression(w, &g.0, depth + 1)?;
        }
        Expression::VariableReference(VariableReferenceExpression { identifier, .. }) => {
            writeln!(w, "Variable Reference")?;
            _display_token(w, identifier, depth + 1)?;
        }
        Expression::VariableAssignment(a) => {
            writeln!(w, "Variable Assignment")?;
            _display_token(w, &a.identifier, depth + 1)?;
            _display_expression(w, &a.value, depth + 1)?;
        }
        Expression::Call(c) => {
            writeln!(w, "Call")?;
            _display_expression(w, &c.callee, depth + 1)?;
            _display_string(w, "Arguments", depth + 1)?;
            for argument in &c.arguments {
                _display_expression(w, argument, depth + 2)?;
            }
        }
        Expression::PropertyGet(g) => {
            writeln!(w, "Property Get")?;
            _display_expression(w, &g.object, depth + 1)?;
            _display_token(w, &g.name, depth + 1)?;
        }
        Expression::PropertySet(s) => {
            writeln!(w, "Property Set")?;
            _display_expression(w, &s.object, depth + 1)?;
            _display_token(w, &s.name, depth + 1)?;
            _display_expression(w, &s.value, depth + 1)?;
        }
        Expression::This(_) => {
            writeln!(w, "This")?;
        }
        Expression::Super(s) => {
            writeln!(w, "Super")?;
            _display_token(w, &s.method, depth + 1)?;
        }
    }
    Ok(())
}

fn _display_token(w: &mut impl Write, t: &Token, depth: u8) -> std::fmt::Result {
    write!(w, "{}", " ".repeat(depth as usize))?;
    write!(w, "{:?}", t.discriminant())?;
    match t.ty() {
        TokenType::String(s) => writeln!(w, " \"{s}\"")?,
        TokenType::Number(n) => writeln!(w, " {n}")?,
        TokenType::Identifier => writeln!(w, " {}", t.lexeme())?,
        _ => writeln!(w)?,
    }
    Ok(())
}

fn _display_string(w: &mut impl Write, s: &str, depth: u8) -> std::fmt::Result {
    write!(w, "{}", " ".repeat(depth as usize))?;
    writeln!(w, "{s}")?;
    Ok(())
}
