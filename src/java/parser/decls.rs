//! Files, imports, classes and their members.

use super::{types::TypeFlags, Parser};
use crate::tree::Checkpoint;

/// Where a declaration appears; decides which member kinds are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Context {
    File,
    Class,
    Interface,
    Annotation,
    Enum,
}

impl Parser<'_, '_> {
    pub(super) fn file(&mut self) {
        self.start_in_place(self.t.java_file);
        if self.at(self.t.package_keyword) {
            self.package_statement();
        }
        self.import_list();
        while !self.at_eof() {
            if !self.eat(self.t.semicolon) {
                self.member_declaration(Context::File);
            }
        }
        self.flush_trivia();
        self.finish_node();
    }

    fn package_statement(&mut self) {
        self.start(self.t.package_statement);
        self.bump();
        if self.at(self.t.identifier) {
            self.code_reference(false);
        }
        self.expect(self.t.semicolon);
        self.finish_node();
    }

    fn import_list(&mut self) {
        // an empty list leaves a leading doc comment to the first class
        if self.at(self.t.import_keyword) {
            self.start(self.t.import_list);
        } else {
            self.flush_trivia_before_doc();
            self.start_in_place(self.t.import_list);
        }
        while self.at(self.t.import_keyword) {
            self.import_statement();
        }
        self.finish_node();
    }

    fn import_statement(&mut self) {
        if self.nth_at(1, self.t.static_keyword) {
            self.start(self.t.import_static_statement);
            self.bump_n(2);
            if self.at(self.t.identifier) {
                self.static_import_reference();
            }
        } else {
            self.start(self.t.import_statement);
            self.bump();
            if self.at(self.t.identifier) {
                self.code_reference(false);
            }
        }
        if self.at(self.t.dot) && self.nth_at(1, self.t.asterisk) {
            self.bump_n(2);
        }
        self.expect(self.t.semicolon);
        self.finish_node();
    }

    /// `a.B.member`: the last segment is an `IMPORT_STATIC_REFERENCE` qualified by the class.
    fn static_import_reference(&mut self) {
        let checkpoint = self.checkpoint();
        self.start(self.t.java_code_reference);
        self.bump();
        self.finish_node();
        while self.at(self.t.dot) && self.nth_at(1, self.t.identifier) {
            if self.nth_at(2, self.t.dot) {
                self.start_at(checkpoint, self.t.java_code_reference);
                self.bump_n(2);
                self.finish_node();
            } else {
                self.start_at(checkpoint, self.t.import_static_reference);
                self.bump_n(2);
                self.finish_node();
                break;
            }
        }
    }

    fn member_checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia_before_doc();
        self.builder.checkpoint()
    }

    pub(super) fn at_class_keyword(&self) -> bool {
        self.at_any(&[self.t.class_keyword, self.t.interface_keyword, self.t.enum_keyword])
            || (self.at(self.t.at) && self.nth_at(1, self.t.interface_keyword))
    }

    /// A class, or a member of a class body. Always consumes at least one token unless the
    /// current token closes the enclosing body.
    pub(super) fn member_declaration(&mut self, context: Context) {
        let checkpoint = self.member_checkpoint();
        self.modifier_list();

        if self.at_class_keyword() {
            self.start_at(checkpoint, self.t.class);
            self.class_rest();
            self.finish_node();
            return;
        }
        if context == Context::File {
            self.start_at(checkpoint, self.t.error_element);
            self.bump();
            self.finish_node();
            return;
        }
        if self.at(self.t.lbrace) {
            self.start_at(checkpoint, self.t.class_initializer);
            self.method_body();
            self.finish_node();
            return;
        }
        if self.at(self.t.lt) {
            self.type_parameter_list();
        }
        if self.at(self.t.identifier) && self.nth_at(1, self.t.lparenth) {
            self.start_at(checkpoint, self.t.method);
            self.bump();
            self.method_rest(false);
            self.finish_node();
            return;
        }
        if !self.type_(TypeFlags::empty()) {
            self.start_at(checkpoint, self.t.error_element);
            if !self.at(self.t.rbrace) {
                self.bump();
            }
            self.finish_node();
            return;
        }
        if !self.at(self.t.identifier) {
            self.start_at(checkpoint, self.t.error_element);
            self.finish_node();
            return;
        }
        if self.nth_at(1, self.t.lparenth) {
            let annotation = context == Context::Annotation;
            let kind = if annotation { self.t.annotation_method } else { self.t.method };
            self.start_at(checkpoint, kind);
            self.bump();
            self.method_rest(annotation);
            self.finish_node();
            return;
        }
        self.start_at(checkpoint, self.t.field);
        self.variable_rest(self.t.field);
        self.finish_node();
    }

    /// Everything of a class after its modifier list.
    pub(super) fn class_rest(&mut self) {
        let context = if self.at(self.t.at) {
            self.bump_n(2);
            Context::Annotation
        } else if self.eat(self.t.interface_keyword) {
            Context::Interface
        } else if self.eat(self.t.enum_keyword) {
            Context::Enum
        } else {
            self.bump();
            Context::Class
        };
        self.expect(self.t.identifier);
        self.type_parameter_list();
        self.reference_list(self.t.extends_list, self.t.extends_keyword);
        self.reference_list(self.t.implements_list, self.t.implements_keyword);
        self.class_body(context);
    }

    pub(super) fn class_body(&mut self, context: Context) {
        if !self.expect(self.t.lbrace) {
            return;
        }
        if context == Context::Enum {
            self.enum_constants();
        }
        while !self.at_eof() && !self.at(self.t.rbrace) {
            if !self.eat(self.t.semicolon) {
                self.member_declaration(context);
            }
        }
        self.expect(self.t.rbrace);
    }

    fn enum_constants(&mut self) {
        while self.at(self.t.identifier) {
            let checkpoint = self.member_checkpoint();
            self.modifier_list();
            self.bump();
            self.start_at(checkpoint, self.t.enum_constant);
            if self.at(self.t.lparenth) {
                self.argument_list();
            }
            if self.at(self.t.lbrace) {
                self.start(self.t.enum_constant_initializer);
                self.class_body(Context::Class);
                self.finish_node();
            }
            self.finish_node();
            if !self.eat(self.t.comma) {
                break;
            }
        }
        self.eat(self.t.semicolon);
    }

    fn method_rest(&mut self, annotation: bool) {
        self.parameter_list();
        while self.at(self.t.lbracket) && self.nth_at(1, self.t.rbracket) {
            self.bump_n(2);
        }
        self.reference_list(self.t.throws_list, self.t.throws_keyword);
        if annotation && self.eat(self.t.default_keyword) {
            self.annotation_value();
        }
        if self.at(self.t.lbrace) {
            self.method_body();
        } else {
            self.expect(self.t.semicolon);
        }
    }

    pub(super) fn method_body(&mut self) {
        if self.deep {
            self.block();
        } else {
            self.lazy_block(self.t.code_block);
        }
    }

    /// Name, dimensions and initializer of a variable; splits `int a, b;` into one node per
    /// variable.
    pub(super) fn variable_rest(&mut self, kind: crate::kinds::ElementType) {
        self.expect(self.t.identifier);
        self.variable_tail();
        while self.at(self.t.comma) {
            self.bump();
            self.finish_node();
            self.start(kind);
            self.expect(self.t.identifier);
            self.variable_tail();
        }
        self.expect(self.t.semicolon);
    }

    fn variable_tail(&mut self) {
        while self.at(self.t.lbracket) && self.nth_at(1, self.t.rbracket) {
            self.bump_n(2);
        }
        if self.eat(self.t.eq) {
            self.variable_initializer();
        }
    }

    pub(super) fn modifier_list(&mut self) {
        self.start(self.t.modifier_list);
        loop {
            match self.current() {
                Some(kind) if self.language.is_modifier(kind) => self.bump(),
                Some(kind) if kind == self.t.at && !self.nth_at(1, self.t.interface_keyword) => self.annotation(),
                _ => break,
            }
        }
        self.finish_node();
    }

    fn annotation(&mut self) {
        self.start(self.t.annotation);
        self.bump();
        if self.at(self.t.identifier) {
            self.code_reference(false);
        } else {
            self.expect(self.t.identifier);
        }
        if self.at(self.t.lparenth) {
            self.start(self.t.annotation_parameter_list);
            self.bump();
            if !self.at(self.t.rparenth) {
                loop {
                    self.start(self.t.name_value_pair);
                    if self.at(self.t.identifier) && self.nth_at(1, self.t.eq) {
                        self.bump_n(2);
                    }
                    self.annotation_value();
                    self.finish_node();
                    if !self.eat(self.t.comma) {
                        break;
                    }
                }
            }
            self.expect(self.t.rparenth);
            self.finish_node();
        }
        self.finish_node();
    }

    fn annotation_value(&mut self) {
        if self.at(self.t.at) {
            self.annotation();
        } else if self.at(self.t.lbrace) {
            self.start(self.t.annotation_array_initializer);
            self.bump();
            while !self.at_eof() && !self.at(self.t.rbrace) {
                self.annotation_value();
                if !self.eat(self.t.comma) {
                    break;
                }
            }
            self.expect(self.t.rbrace);
            self.finish_node();
        } else if !self.expression() {
            self.expect(self.t.identifier);
        }
    }

    fn type_parameter_list(&mut self) {
        self.start(self.t.type_parameter_list);
        if self.eat(self.t.lt) {
            loop {
                self.start(self.t.type_parameter);
                self.expect(self.t.identifier);
                self.start(self.t.extends_bound_list);
                if self.eat(self.t.extends_keyword) {
                    loop {
                        if self.at(self.t.identifier) {
                            self.code_reference(true);
                        } else {
                            self.expect(self.t.identifier);
                        }
                        if !self.eat(self.t.and) {
                            break;
                        }
                    }
                }
                self.finish_node();
                self.finish_node();
                if !self.eat(self.t.comma) {
                    break;
                }
            }
            self.expect(self.t.gt);
        }
        self.finish_node();
    }

    fn reference_list(&mut self, kind: crate::kinds::ElementType, keyword: crate::kinds::ElementType) {
        self.start(kind);
        if self.eat(keyword) {
            loop {
                if self.at(self.t.identifier) {
                    self.code_reference(true);
                } else {
                    self.expect(self.t.identifier);
                }
                if !self.eat(self.t.comma) {
                    break;
                }
            }
        }
        self.finish_node();
    }

    fn parameter_list(&mut self) {
        self.start(self.t.parameter_list);
        self.expect(self.t.lparenth);
        if !self.at(self.t.rparenth) {
            loop {
                self.parameter();
                if !self.eat(self.t.comma) {
                    break;
                }
            }
        }
        self.expect(self.t.rparenth);
        self.finish_node();
    }

    pub(super) fn parameter(&mut self) {
        self.start(self.t.parameter);
        self.modifier_list();
        self.type_(TypeFlags::ELLIPSIS | TypeFlags::DISJUNCTION);
        self.expect(self.t.identifier);
        while self.at(self.t.lbracket) && self.nth_at(1, self.t.rbracket) {
            self.bump_n(2);
        }
        self.finish_node();
    }
}
