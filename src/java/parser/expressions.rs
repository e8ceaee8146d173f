//! Expressions, by precedence climbing.
//!
//! The lexer never combines `>` with a following `>`, so shift operators and their compound
//! assignments are recognized here from adjacent `GT` tokens.

use super::{decls::Context, types::TypeFlags, Parser};
use crate::{kinds::ElementType, tree::Checkpoint};

impl Parser<'_, '_> {
    /// Parses an expression. Returns `false` without consuming anything if none starts here.
    pub(super) fn expression(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.conditional() {
            return false;
        }
        if let Some(len) = self.assignment_operator() {
            self.start_at(checkpoint, self.t.assignment_expression);
            self.bump_n(len);
            self.required_expression();
            self.finish_node();
        }
        true
    }

    /// An expression, or an empty error element where it is missing.
    pub(super) fn required_expression(&mut self) {
        if !self.expression() {
            self.missing();
        }
    }

    fn missing(&mut self) {
        self.start(self.t.error_element);
        self.finish_node();
    }

    /// Number of tokens making up the assignment operator at the current position.
    fn assignment_operator(&self) -> Option<usize> {
        let kind = self.current()?;
        let t = &self.t;
        let simple = [
            t.eq, t.pluseq, t.minuseq, t.asteriskeq, t.diveq, t.andeq, t.oreq, t.xoreq, t.perceq, t.ltlteq,
        ];
        if simple.contains(&kind) {
            return Some(1);
        }
        if kind == t.gt {
            let index = self.nth_index(0)?;
            if self.adjacent(index, t.ge) {
                return Some(2);
            }
            if self.adjacent(index, t.gt) && self.adjacent(index + 1, t.ge) {
                return Some(3);
            }
        }
        None
    }

    fn conditional(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.binary(1) {
            return false;
        }
        if self.at(self.t.quest) {
            self.start_at(checkpoint, self.t.conditional_expression);
            self.bump();
            self.required_expression();
            self.expect(self.t.colon);
            if !self.conditional() {
                self.missing();
            }
            self.finish_node();
        }
        true
    }

    /// Binary operator at the current position as `(precedence, token count)`.
    fn binary_operator(&self) -> Option<(u8, usize)> {
        let kind = self.current()?;
        let t = &self.t;
        let precedence = if kind == t.oror {
            1
        } else if kind == t.andand {
            2
        } else if kind == t.or {
            3
        } else if kind == t.xor {
            4
        } else if kind == t.and {
            5
        } else if kind == t.eqeq || kind == t.ne {
            6
        } else if kind == t.lt || kind == t.le || kind == t.ge || kind == t.instanceof_keyword {
            7
        } else if kind == t.gt {
            let index = self.nth_index(0)?;
            if !self.adjacent(index, t.gt) {
                return if self.adjacent(index, t.ge) { None } else { Some((7, 1)) };
            }
            if !self.adjacent(index + 1, t.gt) {
                return if self.adjacent(index + 1, t.ge) { None } else { Some((8, 2)) };
            }
            return if self.adjacent(index + 2, t.ge) { None } else { Some((8, 3)) };
        } else if kind == t.ltlt {
            8
        } else if kind == t.plus || kind == t.minus {
            9
        } else if kind == t.asterisk || kind == t.div || kind == t.perc {
            10
        } else {
            return None;
        };
        Some((precedence, 1))
    }

    fn binary(&mut self, min_precedence: u8) -> bool {
        let checkpoint = self.checkpoint();
        if !self.unary() {
            return false;
        }
        while let Some((precedence, len)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            if self.at(self.t.instanceof_keyword) {
                self.start_at(checkpoint, self.t.instance_of_expression);
                self.bump();
                if !self.type_(TypeFlags::empty()) {
                    self.expect(self.t.identifier);
                }
                self.finish_node();
                continue;
            }
            self.start_at(checkpoint, self.t.binary_expression);
            self.bump_n(len);
            if !self.binary(precedence + 1) {
                self.missing();
            }
            self.finish_node();
        }
        true
    }

    fn unary(&mut self) -> bool {
        let Some(kind) = self.current() else {
            return false;
        };
        let t = &self.t;
        if [t.plus, t.minus, t.plusplus, t.minusminus, t.excl, t.tilde].contains(&kind) {
            self.start(self.t.prefix_expression);
            self.bump();
            if !self.unary() {
                self.missing();
            }
            self.finish_node();
            return true;
        }
        if kind == t.lparenth && self.at_cast() {
            self.start(self.t.type_cast_expression);
            self.bump();
            self.type_(TypeFlags::empty());
            self.expect(self.t.rparenth);
            if !self.unary() {
                self.missing();
            }
            self.finish_node();
            return true;
        }
        self.postfix()
    }

    /// Whether the parenthesis at the current position opens a cast.
    fn at_cast(&self) -> bool {
        let Some(end) = self.scan_type(1) else {
            return false;
        };
        if !self.nth_at(end, self.t.rparenth) {
            return false;
        }
        if self.nth(1).map_or(false, |kind| self.language.is_primitive(kind)) {
            return true;
        }
        let t = &self.t;
        self.nth(end + 1).map_or(false, |next| {
            self.language.is_literal_token(next)
                || [t.identifier, t.lparenth, t.this_keyword, t.super_keyword, t.new_keyword, t.excl, t.tilde]
                    .contains(&next)
        })
    }

    fn postfix(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.primary(checkpoint) {
            return false;
        }
        while self.at_any(&[self.t.plusplus, self.t.minusminus]) {
            self.start_at(checkpoint, self.t.postfix_expression);
            self.bump();
            self.finish_node();
        }
        true
    }

    fn primary(&mut self, checkpoint: Checkpoint) -> bool {
        let Some(kind) = self.current() else {
            return false;
        };
        if self.language.is_literal_token(kind) {
            self.leaf_expression(self.t.literal_expression);
        } else if kind == self.t.this_keyword {
            self.leaf_expression(self.t.this_expression);
        } else if kind == self.t.super_keyword {
            self.leaf_expression(self.t.super_expression);
        } else if kind == self.t.lparenth {
            self.start(self.t.parenth_expression);
            self.bump();
            self.required_expression();
            self.expect(self.t.rparenth);
            self.finish_node();
        } else if kind == self.t.new_keyword {
            self.new_expression(checkpoint);
        } else if self.at_class_literal() {
            self.type_(TypeFlags::empty());
            self.start_at(checkpoint, self.t.class_object_access_expression);
            self.bump_n(2);
            self.finish_node();
        } else if kind == self.t.identifier {
            self.leaf_expression(self.t.reference_expression);
        } else {
            return false;
        }
        self.selectors(checkpoint);
        true
    }

    fn leaf_expression(&mut self, kind: ElementType) {
        self.start(kind);
        self.bump();
        self.finish_node();
    }

    /// `int.class`, `String[].class`, `java.util.List.class`
    fn at_class_literal(&self) -> bool {
        self.scan_type(0).map_or(false, |end| {
            self.nth_at(end, self.t.dot) && self.nth_at(end + 1, self.t.class_keyword)
        })
    }

    fn selectors(&mut self, checkpoint: Checkpoint) {
        loop {
            if self.at(self.t.dot) {
                if self.nth_at(1, self.t.identifier) {
                    self.start_at(checkpoint, self.t.reference_expression);
                    self.bump_n(2);
                    self.finish_node();
                } else if self.nth_at(1, self.t.lt) {
                    self.start_at(checkpoint, self.t.reference_expression);
                    self.bump();
                    self.reference_parameter_list(true);
                    self.expect(self.t.identifier);
                    self.finish_node();
                } else if self.nth_at(1, self.t.new_keyword) {
                    self.bump();
                    self.new_expression(checkpoint);
                } else if self.nth_at(1, self.t.this_keyword) {
                    self.start_at(checkpoint, self.t.this_expression);
                    self.bump_n(2);
                    self.finish_node();
                } else if self.nth_at(1, self.t.super_keyword) {
                    self.start_at(checkpoint, self.t.super_expression);
                    self.bump_n(2);
                    self.finish_node();
                } else {
                    self.start_at(checkpoint, self.t.reference_expression);
                    self.bump();
                    self.expect(self.t.identifier);
                    self.finish_node();
                    break;
                }
            } else if self.at(self.t.lparenth) {
                self.start_at(checkpoint, self.t.method_call_expression);
                self.argument_list();
                self.finish_node();
            } else if self.at(self.t.lbracket) {
                self.start_at(checkpoint, self.t.array_access_expression);
                self.bump();
                self.required_expression();
                self.expect(self.t.rbracket);
                self.finish_node();
            } else {
                break;
            }
        }
    }

    /// `NEW_EXPRESSION` starting at `new`. For a qualified `outer.new Inner()`, the qualifier
    /// and the dot are already emitted after `checkpoint`.
    fn new_expression(&mut self, checkpoint: Checkpoint) {
        self.start_at(checkpoint, self.t.new_expression);
        self.bump();
        if self.current().map_or(false, |kind| self.language.is_primitive(kind)) {
            self.bump();
        } else if self.at(self.t.identifier) {
            let reference = self.checkpoint();
            self.code_reference(true);
            if self.at(self.t.lparenth) {
                self.argument_list();
                if self.at(self.t.lbrace) {
                    self.start_at(reference, self.t.anonymous_class);
                    self.class_body(Context::Class);
                    self.finish_node();
                }
                self.finish_node();
                return;
            }
        } else {
            self.expect(self.t.identifier);
            self.finish_node();
            return;
        }
        while self.eat(self.t.lbracket) {
            if !self.at(self.t.rbracket) {
                self.required_expression();
            }
            self.expect(self.t.rbracket);
        }
        if self.at(self.t.lbrace) {
            self.array_initializer();
        }
        self.finish_node();
    }

    /// `EXPRESSION_LIST` around `( a, b )`.
    pub(super) fn argument_list(&mut self) {
        self.start(self.t.expression_list);
        self.bump();
        if !self.at(self.t.rparenth) {
            loop {
                self.required_expression();
                if !self.eat(self.t.comma) {
                    break;
                }
            }
        }
        self.expect(self.t.rparenth);
        self.finish_node();
    }

    fn array_initializer(&mut self) {
        self.start(self.t.array_initializer_expression);
        self.bump();
        while !self.at_eof() && !self.at(self.t.rbrace) {
            self.variable_initializer();
            if !self.eat(self.t.comma) {
                break;
            }
        }
        self.expect(self.t.rbrace);
        self.finish_node();
    }

    pub(super) fn variable_initializer(&mut self) {
        if self.at(self.t.lbrace) {
            self.array_initializer();
        } else {
            self.required_expression();
        }
    }
}
