//! Field-level expression parsing using Pratt parsing.
//!
//! Every operand and every binary expression is wrapped in a
//! `FieldExpression` node; comparison and arithmetic operators are wrapped
//! in a `FieldOp` node, while `&&`/`||` stay bare `And`/`Or` tokens. The
//! diagnostics layer depends on both conventions.
//!
//! Operator precedence (low to high):
//! - `||` (1-2)
//! - `&&` (3-4)
//! - `=`, `!=`, `=~`, `!~`, `>`, `>=`, `<`, `<=` (5-6)
//! - `+`, `-` (7-8)
//! - `*`, `/`, `%` (9-10)

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

impl Parser<'_> {
    /// Parse a field expression.
    pub(crate) fn parse_field_expression(&mut self) -> CompletedMarker {
        self.parse_field_expr_bp(0)
    }

    /// Parse a field expression with minimum binding power.
    fn parse_field_expr_bp(&mut self, min_bp: u8) -> CompletedMarker {
        let mut lhs = self.parse_field_operand();

        loop {
            let op = self.current();
            let Some((left_bp, right_bp)) = op.field_binding_power() else {
                break;
            };
            if left_bp < min_bp {
                break;
            }

            let marker = lhs.precede(self);
            if matches!(op, TokenKind::And | TokenKind::Or) {
                self.bump();
            } else {
                self.start_node(SyntaxKind::FieldOp);
                self.bump();
                self.finish_node();
            }

            if self.current().can_start_field_operand() {
                self.parse_field_expr_bp(right_bp);
            } else {
                self.error("expected value after operator");
                self.missing();
            }

            lhs = marker.complete(self, SyntaxKind::FieldExpression);
        }

        lhs
    }

    /// Parse a single operand, wrapped in a `FieldExpression` node.
    fn parse_field_operand(&mut self) -> CompletedMarker {
        let marker = self.start();

        match self.current() {
            TokenKind::Dot => self.parse_attribute_field(),
            kind if kind.is_scope() => self.parse_attribute_field(),
            kind if kind.is_intrinsic() => {
                self.start_node(SyntaxKind::IntrinsicField);
                self.bump();
                self.finish_node();
            }
            kind if kind.can_start_static() => self.parse_static(),
            TokenKind::LParen => {
                self.bump();
                self.parse_field_expr_bp(0);
                if self.at(TokenKind::RParen) {
                    self.bump();
                } else {
                    self.error("expected ')'");
                }
            }
            _ => {
                self.error("expected field expression");
                self.error_until(|_| false);
            }
        }

        marker.complete(self, SyntaxKind::FieldExpression)
    }

    /// Parse an attribute reference: `.foo`, `span.component`,
    /// `parent.span.http.status_code`.
    fn parse_attribute_field(&mut self) {
        let marker = self.start();

        // Scope prefix: one or more scope keywords each followed by a dot.
        while self.current().is_scope() && self.peek_kind_n(1) == TokenKind::Dot {
            self.bump(); // scope keyword
            self.bump(); // `.`
        }

        // Unscoped form carries a leading dot.
        if self.at(TokenKind::Dot) {
            self.bump();
        }

        if self.current().can_be_attribute_name() {
            self.bump();
            while self.at(TokenKind::Dot) {
                self.bump();
                if self.current().can_be_attribute_name() {
                    self.bump();
                } else {
                    self.error("expected attribute name");
                    self.missing();
                    break;
                }
            }
        } else {
            self.error("expected attribute name");
            self.missing();
        }

        marker.complete(self, SyntaxKind::AttributeField);
    }

    /// Parse a literal value into a `Static` node.
    pub(crate) fn parse_static(&mut self) {
        let marker = self.start();

        if self.at(TokenKind::Minus) {
            self.bump();
            if matches!(
                self.current(),
                TokenKind::Integer | TokenKind::Float | TokenKind::DurationLit
            ) {
                self.bump();
            } else {
                self.error("expected numeric literal after '-'");
                self.missing();
            }
        } else {
            self.bump();
        }

        marker.complete(self, SyntaxKind::Static);
    }
}
