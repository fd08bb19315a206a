//! Makefile fixtures in the shape qmake generates them.

/// Excerpt of a `linux-g++` release makefile.
pub const LINUX_MAKEFILE: &str = r#"#############################################################################
# Makefile for building: viewer
# Generated by qmake (3.1) (Qt 5.15.2)
# Project:  viewer.pro
# Template: app
# Command: /usr/bin/qmake -o viewer.makefile -spec linux-g++ viewer.pro
#############################################################################

MAKEFILE      = viewer.makefile

EQ            = =

####### Compiler, tools and options

CC            = gcc
CXX           = g++
DEFINES       = -DQT_NO_DEBUG -DQT_QUICK_LIB -DQT_CORE_LIB
CFLAGS        = -pipe -O2 -Wall -W -D_REENTRANT -fPIC $(DEFINES)
CXXFLAGS      = -pipe -O2 -std=gnu++11 -Wall -W -D_REENTRANT -fPIC $(DEFINES)
INCPATH       = -I. -isystem /usr/include/qt5 -isystem /usr/include/qt5/QtCore -I/usr/lib/qt5/mkspecs/linux-g++
QMAKE         = /usr/bin/qmake
DEL_FILE      = rm -f

####### Files

SOURCES       =
OBJECTS       =
TARGET        = viewer

####### Link

LINK          = g++
LFLAGS        = -Wl,-O1
LIBS          = $(SUBLIBS) -lQt5Quick -lQt5Core -lGL -lpthread

first: all
####### Build rules

viewer:  $(OBJECTS)
	$(LINK) $(LFLAGS) -o $(TARGET) $(OBJECTS) $(OBJCOMP) $(LIBS)
"#;

/// Excerpt of a `win32-g++` (mingw) `Makefile.Release`.
pub const MINGW_MAKEFILE: &str = r#"#############################################################################
# Makefile for building: viewer
# Generated by qmake (3.1) (Qt 5.15.2)
# Project:  viewer.pro
# Template: app
#############################################################################

MAKEFILE      = viewer.makefile.Release

EQ            = =

####### Compiler, tools and options

CC            = gcc
CXX           = g++
DEFINES       = -DUNICODE -DQT_NO_DEBUG
CFLAGS        = -fno-keep-inline-dllexport -O2 -Wall -W -Wextra -Wa,-mbig-obj $(DEFINES)
CXXFLAGS      = -fno-keep-inline-dllexport -O2 -std=gnu++11 -Wall -W -Wextra -Wa,-mbig-obj -fexceptions -mthreads $(DEFINES)
INCPATH       = -I. -IC:/Qt/5.15.2/mingw81_64/include -IC:/Qt/5.15.2/mingw81_64/include/QtCore -Irelease -IC:/Qt/5.15.2/mingw81_64/mkspecs/win32-g++
LINKER      =        g++
LFLAGS        =        -Wl,-s -Wl,-subsystem,windows -mthreads
LIBS        =        C:\Qt\5.15.2\mingw81_64\lib\libQt5Quick.a C:\Qt\5.15.2\mingw81_64\lib\libQt5Core.a  -lmingw32 C:\Qt\5.15.2\mingw81_64\lib\libqtmain.a -lshell32

####### Build rules

first: all
"#;
