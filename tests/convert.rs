use brs_jsdoc::{before_parse, BeforeParseEvent, Converter, ParseError, ParseMode, PluginOptions};

/// Strip the common indentation and the surrounding blank lines, so sources
/// and expectations can be written indented inside the test.
fn undent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let last = lines.iter().rposition(|l| !l.is_empty()).map_or(first, |i| i + 1);
    let lines = &lines[first..last];
    let margin = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if l.is_empty() { *l } else { &l[margin..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn convert(source: &str) -> String {
    Converter::default()
        .convert(source, ParseMode::BrighterScript, "")
        .unwrap()
}

fn expect_output(actual: &str, expected: &str) {
    assert_eq!(undent(actual), undent(expected));
}

// -- hook --

#[test]
fn hook_rewrites_the_event_source() {
    let mut converter = Converter::default();
    let mut event = BeforeParseEvent {
        filename: "main.bs".to_string(),
        source: r#"
            function main()
                print("Hello, World!")
            end function
        "#
        .to_string(),
    };
    before_parse(&mut converter, &mut event).unwrap();
    assert!(event.source.starts_with("/**\n * @module main\n */"));
    assert!(event.source.contains("function main () { };"));
}

// -- functions --

#[test]
fn adds_jsdoc_to_plain_code() {
    expect_output(
        &convert(
            r#"
            function main()
                print("Hello, World!")
            end function
            "#,
        ),
        r#"
            /**
             * @function
             * @returns {dynamic}
             */
            function main () { };
        "#,
    );
}

#[test]
fn converts_comments() {
    expect_output(
        &convert(
            r#"
            ' This is a comment
            ' This is another comment
            function main()
                print("Hello, World!")
            end function
            "#,
        ),
        r#"
            /**
             * This is a comment
             * This is another comment
             * @function
             * @returns {dynamic}
             */
            function main () { };
        "#,
    );
}

#[test]
fn converts_params_and_returns() {
    expect_output(
        &convert(
            r#"
            ' Say hello
            ' @param name you want to say hello to
            ' @returns the greeting
            function sayHello(name as string) as string
                return "Hello, " + name + "!")
            end function
            "#,
        ),
        r#"
            /**
             * Say hello
             * @function
             * @param {string} name you want to say hello to
             * @returns {string} the greeting
             */
            function sayHello (name) { };
        "#,
    );
}

#[test]
fn comment_type_wins_over_declared_type() {
    expect_output(
        &convert(
            r#"
            ' Say hello
            ' @param {roAssociativeArray} person aa with name property
            ' @returns the greeting
            function sayHello(person as object) as string
                return "Hello, " + person.name + "!")
            end function
            "#,
        ),
        r#"
            /**
             * Say hello
             * @function
             * @param {roAssociativeArray} person aa with name property
             * @returns {string} the greeting
             */
            function sayHello (person) { };
        "#,
    );
}

#[test]
fn custom_param_type() {
    expect_output(
        &convert(
            r#"
            ' Say hello
            ' @param johnDoe A Person to say hello to
            ' @returns the greeting
            function sayHello(johnDoe as Person) as string
                return "Hello, " + john.name + "!")
            end function
            "#,
        ),
        r#"
            /**
             * Say hello
             * @function
             * @param {Person} johnDoe A Person to say hello to
             * @returns {string} the greeting
             */
            function sayHello (johnDoe) { };
        "#,
    );
}

#[test]
fn custom_return_type() {
    expect_output(
        &convert(
            r#"
            ' Say hello
            ' @param johnDoe A Person to say hello to
            ' @returns the greeting
            function sayHello(johnDoe as Person) as OtherThing
                return new OtherThing(john.name)
            end function
            "#,
        ),
        r#"
            /**
             * Say hello
             * @function
             * @param {Person} johnDoe A Person to say hello to
             * @returns {OtherThing} the greeting
             */
            function sayHello (johnDoe) { };
        "#,
    );
}

#[test]
fn unknown_tags_pass_through() {
    expect_output(
        &convert(
            r#"
            ' test tags
            ' @sometag details
            function whatever() as integer
                return 123
            end function
            "#,
        ),
        r#"
            /**
             * test tags
             * @sometag details
             * @function
             * @returns {integer}
             */
            function whatever () { };
        "#,
    );
}

#[test]
fn optional_params_show_their_default() {
    expect_output(
        &convert(
            r#"
            ' Move along
            ' @param speed, how fast
            sub move(speed = 1.5, label = "go", target = m.next)
            end sub
            "#,
        ),
        r#"
            /**
             * Move along
             * @function
             * @param {float} [speed=1.5] how fast
             * @param {string} [label="go"]
             * @param {dynamic} [target=m.next]
             * @returns {void}
             */
            function move (speed, label, target) { };
        "#,
    );
}

#[test]
fn functions_and_subs_in_sequence() {
    expect_output(
        &convert(
            r#"
            sub first()
                cb = function(x)
                    return x
                end function
            end sub

            ' the second one
            function second() as boolean
            end function
            "#,
        ),
        r#"
            /**
             * @function
             * @returns {void}
             */
            function first () { };

            /**
             * the second one
             * @function
             * @returns {boolean}
             */
            function second () { };
        "#,
    );
}

#[test]
fn type_designators_name_brightscript_types() {
    let out = Converter::default()
        .convert(
            &undent(
                r#"
                ' Greets someone
                ' @param name$ who to greet
                function greet$(name$, count%)
                    return "hi " + name$
                end function
                "#,
            ),
            ParseMode::BrightScript,
            "",
        )
        .unwrap();
    expect_output(
        &out,
        r#"
            /**
             * Greets someone
             * @function
             * @param {string} name$ who to greet
             * @param {integer} count%
             * @returns {string}
             */
            function greet$ (name$, count%) { };
        "#,
    );
}

// -- classes --

#[test]
fn class_comments() {
    expect_output(
        &convert(
            r#"
            ' A representation of a person
            class Person
                ' The name of the person
                name as string
            end class
            "#,
        ),
        r#"
            /**
             * A representation of a person
             * @property {string} name The name of the person
             */
            class Person {

            }
        "#,
    );
}

#[test]
fn namespaced_class_with_methods() {
    expect_output(
        &convert(
            r#"
            namespace Company
                ' A code monkey
                class Programmer extends Employee
                    ' The name of the person
                    name as string
                    '
                    languages as roArray

                    'Create a new programmer
                    sub new(name as string)
                        m.name = name
                    end sub

                    ' Write some code
                    ' @param lines how many lines to write
                    ' @param language what language to write in
                    ' @returns the code
                    function writeCode(lines as integer, language as string) as string
                        return "Code written"
                    end function
                end class
            end namespace
            "#,
        ),
        r#"
            /**
             * @global
             * @namespace Company
             */
            var Company = {};

            /**
             * A code monkey
             * @extends Employee
             * @memberof! Company
             * @property {string} name The name of the person
             * @property {roArray} languages
             */
            class Programmer extends Employee {

            /**
             * Create a new programmer
             * @function
             * @param {string} name
             * @constructor
             * @returns {Company.Programmer}
             */
            constructor(name) { };

            /**
             * Write some code
             * @function
             * @param {integer} lines how many lines to write
             * @param {string} language what language to write in
             * @returns {string} the code
             */
            writeCode (lines, language) { };

            }

            Company.Programmer = Programmer;
        "#,
    );
}

#[test]
fn deeply_namespaced_class() {
    expect_output(
        &convert(
            r#"
            ' @module BGE
            namespace BGE.Debug.Alpha.Beta

            class DebugWindow extends BGE.UI.UiContainer

                function new(game as BGE.Game) as void
                    super(game)
                    m.backgroundRGBA = BGE.RGBAtoRGBA(128, 128, 128, 0.5)
                    m.padding.set(10)
                end function
            end class

            end namespace
            "#,
        ),
        r#"
            /**
             * @global
             * @namespace BGE
             */
            var BGE = {};

            /**
             * @global
             * @namespace BGE/Debug
             * @alias BGE.Debug
             */
            BGE.Debug = {};

            /**
             * @global
             * @namespace BGE/Debug/Alpha
             * @alias BGE.Debug.Alpha
             */
            BGE.Debug.Alpha = {};

            /**
             * @global
             * @namespace BGE/Debug/Alpha/Beta
             * @alias BGE.Debug.Alpha.Beta
             */
            BGE.Debug.Alpha.Beta = {};

            /**
             * @extends BGE.UI.UiContainer
             * @memberof! BGE/Debug/Alpha/Beta
             */
            class DebugWindow extends BGE.UI.UiContainer {

            /**
             * @function
             * @param {BGE.Game} game
             * @constructor
             * @returns {BGE.Debug.Alpha.Beta.DebugWindow}
             */
            constructor(game) { };

            }

            BGE.Debug.Alpha.Beta.DebugWindow = DebugWindow;
        "#,
    );
}

#[test]
fn method_access_levels() {
    expect_output(
        &convert(
            r#"
            class Worker
                private hidden as string
                protected override function step() as integer
                end function
                private sub rest()
                end sub
                sub _internal()
                end sub
            end class
            "#,
        ),
        r#"
            /**
             */
            class Worker {

            /**
             * @function
             * @access protected
             * @override
             * @returns {integer}
             */
            step () { };

            /**
             * @function
             * @access private
             * @returns {void}
             */
            rest () { };

            /**
             * @function
             * @access private
             * @returns {void}
             */
            _internal () { };

            }
        "#,
    );
}

#[test]
fn designated_class_fields() {
    expect_output(
        &convert(
            r#"
            class Person
                ' The name of the person
                name$ = "x"
                total#
            end class
            "#,
        ),
        r#"
            /**
             * @property {string} name$ The name of the person
             * @property {double} total#
             */
            class Person {

            }
        "#,
    );
}

// -- enums --

#[test]
fn enums() {
    expect_output(
        &convert(
            r#"
            ' Some colors
            enum Colors
                Red = 0
                Green = 1
                Blue = 2
            end enum
            "#,
        ),
        r#"
            /**
             * Some colors
             * @readonly
             * @enum
             */
            var Colors = {
            Red: 0,
            Green: 1,
            Blue: 2,
            };
        "#,
    );
}

#[test]
fn enums_in_namespaces() {
    expect_output(
        &convert(
            r#"
            namespace alpha
                ' Some colors
                enum Colors
                    Red = 0
                    Green = 1
                    Blue = 2
                end enum
            end namespace
            "#,
        ),
        r#"
            /**
             * @global
             * @namespace alpha
             */
            var alpha = {};

            /**
             * Some colors
             * @memberof! alpha
             * @readonly
             * @enum
             */
            alpha.Colors = {
            Red: 0,
            Green: 1,
            Blue: 2,
            };
        "#,
    );
}

#[test]
fn enums_with_member_comments() {
    expect_output(
        &convert(
            r#"
            ' Some colors
            enum Colors
                ' ruby
                Red = 0
                ' emerald
                Green = 1
                ' sapphire
                Blue = 2
            end enum
            "#,
        ),
        r#"
            /**
             * Some colors
             * @readonly
             * @enum
             */
            var Colors = {
            /**
             * ruby
             */
            Red: 0,
            /**
             * emerald
             */
            Green: 1,
            /**
             * sapphire
             */
            Blue: 2,
            };
        "#,
    );
}

#[test]
fn enum_member_after_string_member_keeps_the_file() {
    let out = convert(
        r#"
        enum Tone
            High = "high"
            Low
        end enum

        function ok()
        end function
        "#,
    );
    assert!(out.contains("High: \"high\",\nLow: {},\n};"), "{out}");
    assert!(out.contains("function ok () { };"), "{out}");
}

// -- interfaces --

#[test]
fn interfaces() {
    expect_output(
        &convert(
            r#"
            ' an interface for a person
            interface Person
                name as string
            end interface
            "#,
        ),
        r#"
            /**
             * an interface for a person
             * @interface
             * @property {string} name
             */
            function Person() { };
        "#,
    );
}

#[test]
fn interface_with_function() {
    expect_output(
        &convert(
            r#"
            ' an interface for a person
            interface Person
                name as string

                ' how high should they jump
                function jump(howHigh as float) as string
            end interface
            "#,
        ),
        r#"
            /**
             * an interface for a person
             * @interface
             * @property {string} name
             */
            function Person() { };

            /**
             * how high should they jump
             * @function
             * @param {float} howHigh
             * @returns {string}
             */
            Person.prototype.jump = function(howHigh) { };
        "#,
    );
}

#[test]
fn interface_in_a_namespace() {
    expect_output(
        &convert(
            r#"
            namespace alpha
                ' an interface for a person
                interface Person
                    name as string

                    ' how high should they jump
                    function jump(howHigh as float) as string
                end interface
            end namespace
            "#,
        ),
        r#"
            /**
             * @global
             * @namespace alpha
             */
            var alpha = {};

            /**
             * an interface for a person
             * @interface
             * @memberof! alpha
             * @property {string} name
             */
            function Person() { };

            /**
             * how high should they jump
             * @function
             * @param {float} howHigh
             * @returns {string}
             */
            Person.prototype.jump = function(howHigh) { };

            alpha.Person = Person;
        "#,
    );
}

// -- constants --

#[test]
fn constants() {
    expect_output(
        &convert(
            r#"
            ' Test comment
            const MY_CONSTANT = "hello"
            "#,
        ),
        r#"
            /**
             * Test comment
             * @readonly
             * @constant
             * @default
             */
            var MY_CONSTANT = "hello";
        "#,
    );
}

#[test]
fn constants_in_namespaces() {
    expect_output(
        &convert(
            r#"
            namespace alpha
                ' Test comment
                const MY_CONSTANT = "hello"
            end namespace
            "#,
        ),
        r#"
            /**
             * @global
             * @namespace alpha
             */
            var alpha = {};

            /**
             * Test comment
             * @memberof! alpha
             * @readonly
             * @constant
             * @default
             */
            var MY_CONSTANT = "hello";
            alpha.MY_CONSTANT = MY_CONSTANT;
        "#,
    );
}

// -- modules and options --

#[test]
fn module_membership() {
    let mut converter = Converter::default();
    let out = converter
        .convert(
            "' Entry point\nsub main()\nend sub\nenum Mode\n  On\nend enum",
            ParseMode::BrighterScript,
            "game.main",
        )
        .unwrap();
    expect_output(
        &out,
        r#"
            /**
             * @module game/main
             */
            /**
             * Entry point
             * @function
             * @memberof! module:game/main
             * @returns {void}
             */
            function main () { };

            /**
             * @memberof! module:game/main
             * @readonly
             * @enum
             */
            var Mode = {
            On: 0,
            };
        "#,
    );
}

#[test]
fn namespace_membership_beats_module() {
    let out = Converter::default()
        .convert(
            "namespace util\nfunction clamp(x as float) as float\nend function\nend namespace",
            ParseMode::BrighterScript,
            "main",
        )
        .unwrap();
    assert!(out.contains(" * @memberof! util\n"), "{out}");
    assert!(!out.contains("module:main"), "{out}");
    assert!(out.ends_with("util.clamp = clamp;"), "{out}");
}

#[test]
fn html_escaping_can_be_switched_off() {
    let source = "' Returns a < b & c\nfunction cmp() as boolean\nend function";

    let escaped = Converter::default()
        .convert(source, ParseMode::BrighterScript, "")
        .unwrap();
    assert!(escaped.contains(" * Returns a &lt; b &amp; c\n"), "{escaped}");

    let options = PluginOptions {
        add_module: true,
        escape_html_characters: false,
    };
    let raw = Converter::new(options)
        .convert(source, ParseMode::BrighterScript, "")
        .unwrap();
    assert!(raw.contains(" * Returns a < b & c\n"), "{raw}");
}

#[test]
fn shared_converter_declares_namespaces_once() {
    let mut converter = Converter::default();
    let a = converter
        .convert("namespace shared\nsub a()\nend sub\nend namespace", ParseMode::BrighterScript, "a")
        .unwrap();
    let b = converter
        .convert("namespace Shared\nsub b()\nend sub\nend namespace", ParseMode::BrighterScript, "b")
        .unwrap();
    assert!(a.contains("var shared = {};"));
    assert!(!b.contains("@namespace"), "{b}");
    assert!(b.contains("Shared.b = b;"), "{b}");
}

#[test]
fn brightscript_files_still_convert() {
    let mut converter = Converter::default();
    let mut event = BeforeParseEvent {
        filename: "source/lib.brs".to_string(),
        source: "' Adds numbers\nfunction add(a as integer, b as integer) as integer\n  return a + b\nend function\n".to_string(),
    };
    before_parse(&mut converter, &mut event).unwrap();
    assert!(event.source.contains(" * @param {integer} a\n * @param {integer} b\n * @memberof! module:lib\n"));
}

#[test]
fn parse_errors_propagate() {
    let err = Converter::default()
        .convert("sub main()\n  print 1\n", ParseMode::BrighterScript, "")
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::Unterminated {
            keyword: "sub".to_string(),
            line: 1
        }
    );
}
