//! The Java element type tables.

use crate::kinds::element_types;

element_types! {
    /// Tokens and composite nodes of Java source files.
    pub struct JavaElementTypes {
        Leaf {
            identifier => "IDENTIFIER",
            whitespace => "WHITE_SPACE",
            c_style_comment => "C_STYLE_COMMENT",
            end_of_line_comment => "END_OF_LINE_COMMENT",
            bad_character => "BAD_CHARACTER",

            integer_literal => "INTEGER_LITERAL",
            long_literal => "LONG_LITERAL",
            float_literal => "FLOAT_LITERAL",
            double_literal => "DOUBLE_LITERAL",
            character_literal => "CHARACTER_LITERAL",
            string_literal => "STRING_LITERAL",

            true_keyword => "TRUE_KEYWORD",
            false_keyword => "FALSE_KEYWORD",
            null_keyword => "NULL_KEYWORD",

            abstract_keyword => "ABSTRACT_KEYWORD",
            assert_keyword => "ASSERT_KEYWORD",
            boolean_keyword => "BOOLEAN_KEYWORD",
            break_keyword => "BREAK_KEYWORD",
            byte_keyword => "BYTE_KEYWORD",
            case_keyword => "CASE_KEYWORD",
            catch_keyword => "CATCH_KEYWORD",
            char_keyword => "CHAR_KEYWORD",
            class_keyword => "CLASS_KEYWORD",
            const_keyword => "CONST_KEYWORD",
            continue_keyword => "CONTINUE_KEYWORD",
            default_keyword => "DEFAULT_KEYWORD",
            do_keyword => "DO_KEYWORD",
            double_keyword => "DOUBLE_KEYWORD",
            else_keyword => "ELSE_KEYWORD",
            enum_keyword => "ENUM_KEYWORD",
            extends_keyword => "EXTENDS_KEYWORD",
            final_keyword => "FINAL_KEYWORD",
            finally_keyword => "FINALLY_KEYWORD",
            float_keyword => "FLOAT_KEYWORD",
            for_keyword => "FOR_KEYWORD",
            goto_keyword => "GOTO_KEYWORD",
            if_keyword => "IF_KEYWORD",
            implements_keyword => "IMPLEMENTS_KEYWORD",
            import_keyword => "IMPORT_KEYWORD",
            instanceof_keyword => "INSTANCEOF_KEYWORD",
            int_keyword => "INT_KEYWORD",
            interface_keyword => "INTERFACE_KEYWORD",
            long_keyword => "LONG_KEYWORD",
            native_keyword => "NATIVE_KEYWORD",
            new_keyword => "NEW_KEYWORD",
            package_keyword => "PACKAGE_KEYWORD",
            private_keyword => "PRIVATE_KEYWORD",
            protected_keyword => "PROTECTED_KEYWORD",
            public_keyword => "PUBLIC_KEYWORD",
            return_keyword => "RETURN_KEYWORD",
            short_keyword => "SHORT_KEYWORD",
            static_keyword => "STATIC_KEYWORD",
            strictfp_keyword => "STRICTFP_KEYWORD",
            super_keyword => "SUPER_KEYWORD",
            switch_keyword => "SWITCH_KEYWORD",
            synchronized_keyword => "SYNCHRONIZED_KEYWORD",
            this_keyword => "THIS_KEYWORD",
            throw_keyword => "THROW_KEYWORD",
            throws_keyword => "THROWS_KEYWORD",
            transient_keyword => "TRANSIENT_KEYWORD",
            try_keyword => "TRY_KEYWORD",
            void_keyword => "VOID_KEYWORD",
            volatile_keyword => "VOLATILE_KEYWORD",
            while_keyword => "WHILE_KEYWORD",

            lparenth => "LPARENTH",
            rparenth => "RPARENTH",
            lbrace => "LBRACE",
            rbrace => "RBRACE",
            lbracket => "LBRACKET",
            rbracket => "RBRACKET",
            semicolon => "SEMICOLON",
            comma => "COMMA",
            dot => "DOT",
            ellipsis => "ELLIPSIS",
            at => "AT",
            eq => "EQ",
            gt => "GT",
            lt => "LT",
            excl => "EXCL",
            tilde => "TILDE",
            quest => "QUEST",
            colon => "COLON",
            double_colon => "DOUBLE_COLON",
            arrow => "ARROW",
            eqeq => "EQEQ",
            le => "LE",
            ge => "GE",
            ne => "NE",
            andand => "ANDAND",
            oror => "OROR",
            plusplus => "PLUSPLUS",
            minusminus => "MINUSMINUS",
            plus => "PLUS",
            minus => "MINUS",
            asterisk => "ASTERISK",
            div => "DIV",
            and => "AND",
            or => "OR",
            xor => "XOR",
            perc => "PERC",
            ltlt => "LTLT",
            pluseq => "PLUSEQ",
            minuseq => "MINUSEQ",
            asteriskeq => "ASTERISKEQ",
            diveq => "DIVEQ",
            andeq => "ANDEQ",
            oreq => "OREQ",
            xoreq => "XOREQ",
            perceq => "PERCEQ",
            ltlteq => "LTLTEQ",
        }
        Composite {
            java_file => "JAVA_FILE",
            package_statement => "PACKAGE_STATEMENT",
            import_list => "IMPORT_LIST",
            import_statement => "IMPORT_STATEMENT",
            import_static_statement => "IMPORT_STATIC_STATEMENT",
            import_static_reference => "IMPORT_STATIC_REFERENCE",

            class => "CLASS",
            anonymous_class => "ANONYMOUS_CLASS",
            enum_constant => "ENUM_CONSTANT",
            enum_constant_initializer => "ENUM_CONSTANT_INITIALIZER",
            extends_list => "EXTENDS_LIST",
            implements_list => "IMPLEMENTS_LIST",
            type_parameter_list => "TYPE_PARAMETER_LIST",
            type_parameter => "TYPE_PARAMETER",
            extends_bound_list => "EXTENDS_BOUND_LIST",
            field => "FIELD",
            local_variable => "LOCAL_VARIABLE",
            method => "METHOD",
            annotation_method => "ANNOTATION_METHOD",
            class_initializer => "CLASS_INITIALIZER",
            parameter_list => "PARAMETER_LIST",
            parameter => "PARAMETER",
            throws_list => "THROWS_LIST",
            modifier_list => "MODIFIER_LIST",
            annotation => "ANNOTATION",
            annotation_parameter_list => "ANNOTATION_PARAMETER_LIST",
            name_value_pair => "NAME_VALUE_PAIR",
            annotation_array_initializer => "ANNOTATION_ARRAY_INITIALIZER",
            java_code_reference => "JAVA_CODE_REFERENCE",
            reference_parameter_list => "REFERENCE_PARAMETER_LIST",
            type_element => "TYPE",

            block_statement => "BLOCK_STATEMENT",
            empty_statement => "EMPTY_STATEMENT",
            expression_statement => "EXPRESSION_STATEMENT",
            declaration_statement => "DECLARATION_STATEMENT",
            if_statement => "IF_STATEMENT",
            while_statement => "WHILE_STATEMENT",
            for_statement => "FOR_STATEMENT",
            foreach_statement => "FOREACH_STATEMENT",
            do_while_statement => "DO_WHILE_STATEMENT",
            switch_statement => "SWITCH_STATEMENT",
            switch_label_statement => "SWITCH_LABEL_STATEMENT",
            return_statement => "RETURN_STATEMENT",
            throw_statement => "THROW_STATEMENT",
            break_statement => "BREAK_STATEMENT",
            continue_statement => "CONTINUE_STATEMENT",
            synchronized_statement => "SYNCHRONIZED_STATEMENT",
            try_statement => "TRY_STATEMENT",
            catch_section => "CATCH_SECTION",
            assert_statement => "ASSERT_STATEMENT",
            labeled_statement => "LABELED_STATEMENT",

            reference_expression => "REFERENCE_EXPRESSION",
            method_call_expression => "METHOD_CALL_EXPRESSION",
            new_expression => "NEW_EXPRESSION",
            literal_expression => "LITERAL_EXPRESSION",
            this_expression => "THIS_EXPRESSION",
            super_expression => "SUPER_EXPRESSION",
            parenth_expression => "PARENTH_EXPRESSION",
            binary_expression => "BINARY_EXPRESSION",
            prefix_expression => "PREFIX_EXPRESSION",
            postfix_expression => "POSTFIX_EXPRESSION",
            type_cast_expression => "TYPE_CAST_EXPRESSION",
            conditional_expression => "CONDITIONAL_EXPRESSION",
            assignment_expression => "ASSIGNMENT_EXPRESSION",
            instance_of_expression => "INSTANCE_OF_EXPRESSION",
            array_access_expression => "ARRAY_ACCESS_EXPRESSION",
            array_initializer_expression => "ARRAY_INITIALIZER_EXPRESSION",
            class_object_access_expression => "CLASS_OBJECT_ACCESS_EXPRESSION",
            expression_list => "EXPRESSION_LIST",

            error_element => "ERROR_ELEMENT",
            dummy_element => "DUMMY_ELEMENT",
        }
        Lazy {
            code_block => "CODE_BLOCK",
            expression_text => "EXPRESSION_TEXT",
            type_text => "TYPE_TEXT",
            reference_text => "REFERENCE_TEXT",
        }
    }
}

element_types! {
    /// Doc comments and their contents.
    pub struct JavaDocElementTypes {
        Leaf {
            comment_start => "DOC_COMMENT_START",
            comment_end => "DOC_COMMENT_END",
            comment_data => "DOC_COMMENT_DATA",
            leading_asterisks => "DOC_COMMENT_LEADING_ASTERISKS",
            tag_name => "DOC_TAG_NAME",
            space => "DOC_SPACE",
            inline_tag_start => "DOC_INLINE_TAG_START",
            inline_tag_end => "DOC_INLINE_TAG_END",
        }
        Composite {
            tag => "DOC_TAG",
            inline_tag => "DOC_INLINE_TAG",
        }
        Lazy {
            comment => "DOC_COMMENT",
        }
    }
}
