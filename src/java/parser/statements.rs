//! Code blocks and statements.

use super::{types::TypeFlags, Parser};

impl Parser<'_, '_> {
    /// A `CODE_BLOCK` node around `{ ... }`.
    pub(super) fn block(&mut self) {
        self.start(self.t.code_block);
        self.block_contents();
        self.finish_node();
    }

    /// The braces and statements of a block, added to the currently open node.
    pub(super) fn block_contents(&mut self) {
        if !self.expect(self.t.lbrace) {
            return;
        }
        while !self.at_eof() && !self.at(self.t.rbrace) {
            self.statement();
        }
        self.expect(self.t.rbrace);
    }

    /// Parses one statement. Consumes at least one token unless at the end of input or a
    /// closing brace, where the missing statement is marked with an empty error element.
    pub(super) fn statement(&mut self) {
        let Some(kind) = self.current() else {
            self.expect(self.t.semicolon);
            return;
        };
        let t = &self.t;

        if kind == t.rbrace {
            self.expect(self.t.semicolon);
        } else if kind == t.lbrace {
            self.start(self.t.block_statement);
            self.block();
            self.finish_node();
        } else if kind == t.semicolon {
            self.start(self.t.empty_statement);
            self.bump();
            self.finish_node();
        } else if kind == t.if_keyword {
            self.start(self.t.if_statement);
            self.bump();
            self.condition();
            self.statement();
            if self.eat(self.t.else_keyword) {
                self.statement();
            }
            self.finish_node();
        } else if kind == t.while_keyword {
            self.start(self.t.while_statement);
            self.bump();
            self.condition();
            self.statement();
            self.finish_node();
        } else if kind == t.do_keyword {
            self.start(self.t.do_while_statement);
            self.bump();
            self.statement();
            self.expect(self.t.while_keyword);
            self.condition();
            self.expect(self.t.semicolon);
            self.finish_node();
        } else if kind == t.for_keyword {
            self.for_statement();
        } else if kind == t.return_keyword {
            self.start(self.t.return_statement);
            self.bump();
            if !self.at(self.t.semicolon) {
                self.required_expression();
            }
            self.expect(self.t.semicolon);
            self.finish_node();
        } else if kind == t.throw_keyword {
            self.start(self.t.throw_statement);
            self.bump();
            self.required_expression();
            self.expect(self.t.semicolon);
            self.finish_node();
        } else if kind == t.break_keyword || kind == t.continue_keyword {
            let node = if kind == t.break_keyword { t.break_statement } else { t.continue_statement };
            self.start(node);
            self.bump();
            self.eat(self.t.identifier);
            self.expect(self.t.semicolon);
            self.finish_node();
        } else if kind == t.try_keyword {
            self.try_statement();
        } else if kind == t.assert_keyword {
            self.start(self.t.assert_statement);
            self.bump();
            self.required_expression();
            if self.eat(self.t.colon) {
                self.required_expression();
            }
            self.expect(self.t.semicolon);
            self.finish_node();
        } else if kind == t.switch_keyword {
            self.switch_statement();
        } else if kind == t.synchronized_keyword && self.nth_at(1, self.t.lparenth) {
            self.start(self.t.synchronized_statement);
            self.bump();
            self.condition();
            self.block();
            self.finish_node();
        } else if kind == t.identifier && self.nth_at(1, self.t.colon) {
            self.start(self.t.labeled_statement);
            self.bump_n(2);
            self.statement();
            self.finish_node();
        } else if self.at_local_declaration() {
            self.declaration_statement();
        } else {
            let checkpoint = self.checkpoint();
            if self.expression() {
                self.start_at(checkpoint, self.t.expression_statement);
                self.expect(self.t.semicolon);
                self.finish_node();
            } else {
                self.error_bump();
            }
        }
    }

    fn at_local_declaration(&self) -> bool {
        let Some(kind) = self.current() else {
            return false;
        };
        if self.at_class_keyword() || kind == self.t.at {
            return true;
        }
        if self.language.is_modifier(kind) && kind != self.t.default_keyword {
            return true;
        }
        self.scan_type(0)
            .map_or(false, |n| self.nth_at(n, self.t.identifier))
    }

    /// `DECLARATION_STATEMENT` holding a local class or one `LOCAL_VARIABLE` per declared name.
    pub(super) fn declaration_statement(&mut self) {
        self.start(self.t.declaration_statement);
        let checkpoint = self.checkpoint();
        self.modifier_list();
        if self.at_class_keyword() {
            self.start_at(checkpoint, self.t.class);
            self.class_rest();
            self.finish_node();
        } else {
            self.type_(TypeFlags::empty());
            self.start_at(checkpoint, self.t.local_variable);
            self.variable_rest(self.t.local_variable);
            self.finish_node();
        }
        self.finish_node();
    }

    /// `( expression )`
    fn condition(&mut self) {
        self.expect(self.t.lparenth);
        self.required_expression();
        self.expect(self.t.rparenth);
    }

    fn for_statement(&mut self) {
        let mut n = 2;
        while self.nth_at(n, self.t.final_keyword) {
            n += 1;
        }
        let foreach = self.nth_at(1, self.t.lparenth)
            && self.scan_type(n).map_or(false, |end| {
                self.nth_at(end, self.t.identifier) && self.nth_at(end + 1, self.t.colon)
            });

        if foreach {
            self.start(self.t.foreach_statement);
            self.bump_n(2);
            self.parameter();
            self.expect(self.t.colon);
            self.required_expression();
            self.expect(self.t.rparenth);
            self.statement();
            self.finish_node();
            return;
        }

        self.start(self.t.for_statement);
        self.bump();
        self.expect(self.t.lparenth);
        if self.at_local_declaration() {
            self.declaration_statement();
        } else {
            if !self.at(self.t.semicolon) {
                self.expression_list_statement();
            }
            self.expect(self.t.semicolon);
        }
        if !self.at(self.t.semicolon) {
            self.required_expression();
        }
        self.expect(self.t.semicolon);
        if !self.at(self.t.rparenth) {
            self.expression_list_statement();
        }
        self.expect(self.t.rparenth);
        self.statement();
        self.finish_node();
    }

    /// `i = 0, j = 1` in the head of a `for`.
    fn expression_list_statement(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.expression() {
            self.error_bump();
            return;
        }
        self.start_at(checkpoint, self.t.expression_statement);
        while self.eat(self.t.comma) {
            self.required_expression();
        }
        self.finish_node();
    }

    fn try_statement(&mut self) {
        self.start(self.t.try_statement);
        self.bump();
        self.block();
        while self.at(self.t.catch_keyword) {
            self.start(self.t.catch_section);
            self.bump();
            self.expect(self.t.lparenth);
            self.parameter();
            self.expect(self.t.rparenth);
            self.block();
            self.finish_node();
        }
        if self.eat(self.t.finally_keyword) {
            self.block();
        }
        self.finish_node();
    }

    fn switch_statement(&mut self) {
        self.start(self.t.switch_statement);
        self.bump();
        self.condition();
        self.start(self.t.code_block);
        if self.expect(self.t.lbrace) {
            while !self.at_eof() && !self.at(self.t.rbrace) {
                if self.at(self.t.case_keyword) {
                    self.start(self.t.switch_label_statement);
                    self.bump();
                    self.required_expression();
                    self.expect(self.t.colon);
                    self.finish_node();
                } else if self.at(self.t.default_keyword) && self.nth_at(1, self.t.colon) {
                    self.start(self.t.switch_label_statement);
                    self.bump_n(2);
                    self.finish_node();
                } else {
                    self.statement();
                }
            }
            self.expect(self.t.rbrace);
        }
        self.finish_node();
        self.finish_node();
    }
}
